use thiserror::Error;

/// Marshalling transport and configuration errors.
///
/// Content problems never surface here; they are reported as warnings.
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] crate::rfc::vcard::xcard::ParseError),

    #[error("Generated invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    CoreError(#[from] cardwire_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
