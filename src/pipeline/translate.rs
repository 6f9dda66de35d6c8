/// Fixed bilingual dictionary for vision label vocabulary. The vision
/// collaborator reports English category labels; the report surface is
/// Latvian, so known labels render as "translation (original)".
const TRANSLATIONS: &[(&str, &str)] = &[
    ("Toy", "Rotaļlieta"),
    ("Child", "Bērns"),
    ("Electronics", "Elektronika"),
    ("Electrical", "Elektrisks"),
    ("Plug", "Kontaktdakša"),
    ("Construction", "Būvniecība"),
    ("Building", "Ēka"),
    ("Material", "Materiāls"),
    ("Smart", "Vieds"),
    ("Device", "Ierīce"),
    ("Appliance", "Iekārta"),
    ("Furniture", "Mēbeles"),
    ("Clothing", "Apģērbs"),
    ("Food", "Pārtika"),
    ("Beverage", "Dzēriens"),
    ("Vehicle", "Transportlīdzeklis"),
    ("Tool", "Instruments"),
    ("Personal Care", "Personīgā higiēna"),
    ("Cosmetics", "Kosmētika"),
    ("Kitchen", "Virtuve"),
    ("Home", "Mājas"),
    ("Garden", "Dārzs"),
    ("Outdoor", "Āra"),
    ("Sport", "Sports"),
    ("Game", "Spēle"),
    ("Book", "Grāmata"),
    ("Jewelry", "Rotaslietas"),
    ("Watch", "Pulkstenis"),
    ("Phone", "Tālrunis"),
    ("Computer", "Dators"),
    ("Camera", "Kamera"),
    ("Light", "Gaisma"),
    ("Battery", "Akumulators"),
    ("Machine", "Mašīna"),
    ("Hardware", "Aperatūra"),
    ("Plumbing", "Santehnika"),
    ("Decor", "Dekors"),
    ("Unknown Product", "Nezināma prece"),
];

/// Translate a raw vision label into its display form.
///
/// Known label → "translation (label)"; unknown label passes through
/// unchanged. Total function, no state.
pub fn translate_label(label: &str) -> String {
    match TRANSLATIONS.iter().find(|(en, _)| *en == label) {
        Some((en, lv)) => format!("{lv} ({en})"),
        None => label.to_string(),
    }
}
