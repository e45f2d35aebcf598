//! vCard records used by the xCard scenario tests.

use crate::rfc::vcard::core::VCard;
use crate::rfc::vcard::types::{
    KindType, MemberType, TextListType, TextType, VCardType,
};

/// Individual with a nickname list and a pref parameter.
pub fn card_with_nicknames() -> VCard {
    let mut card = VCard::new();
    card.set_formatted_name(Some(TextType::formatted_name("Anna Smith")));

    let mut nickname = TextListType::nickname().with_values(["Anna", "Ann"]);
    nickname.sub_types_mut().set_pref(1);
    card.add_type(nickname);
    card
}

/// Group record listing two members.
pub fn group_card() -> VCard {
    let mut card = VCard::new();
    card.set_formatted_name(Some(TextType::formatted_name("Book Club")));
    card.set_kind(Some(KindType::group()));
    card.add_type(MemberType::new("urn:uuid:03a0e51f-d1aa-4385-8a53-e29025acd8af"));
    card.add_type(MemberType::new("mailto:subscriber1@example.com"));
    card
}

/// Individual whose properties are spread over two groups.
pub fn grouped_card() -> VCard {
    let mut card = VCard::new();
    card.set_formatted_name(Some(TextType::formatted_name("John Doe")));
    card.add_extended_type(TextType::grouped("item2", "X-ABLABEL", "Office"));

    let mut categories = TextListType::categories().with_values(["work", "friends"]);
    categories.set_group(Some("item1".to_string()));
    categories.sub_types_mut().put("X-SOURCE", "import");
    card.add_type(categories);

    card.add_extended_type(TextType::grouped("item1", "X-ABLABEL", "Home"));
    card
}
