use super::*;

#[test]
fn known_names() {
    let zero = name(Identifier::new(0).unwrap());
    assert_eq!(zero.to_string(), "LIMINAL BECOMING PSYCHE");

    let max = name(Identifier::new(8191).unwrap());
    assert_eq!(max.to_string(), "VERNAL DRIFTING EKPYROSIS");

    // 5290 = 0b1_0100_1010_1010: adj 0b1010, verb 0b1010, noun 0b10100.
    let intro = name(Identifier::new(5290).unwrap());
    assert_eq!(intro.adjective, "ABYSSAL");
    assert_eq!(intro.verb, "TRAVERSING");
    assert_eq!(intro.noun, "STASIS");
}

#[test]
fn name_is_total_and_deterministic() {
    for v in 0..=8191u16 {
        let id = Identifier::new(v).unwrap();
        let a = name(id);
        let b = name(id);
        assert_eq!(a, b);
        assert_eq!(ADJECTIVES.iter().filter(|w| **w == a.adjective).count(), 1);
        assert_eq!(VERBS.iter().filter(|w| **w == a.verb).count(), 1);
        assert_eq!(NOUNS.iter().filter(|w| **w == a.noun).count(), 1);
        assert_eq!(a.to_string().split(' ').count(), 3);
    }
}

#[test]
fn name_for_bits_masks_high_bits() {
    assert_eq!(name_for_bits(8192 + 17), name_for_bits(17));
    assert_eq!(name_for_bits(u32::MAX), name(Identifier::new(8191).unwrap()));
}

#[test]
fn vocabularies_have_unique_words() {
    let mut all: Vec<&str> = ADJECTIVES
        .iter()
        .chain(VERBS.iter())
        .chain(NOUNS.iter())
        .copied()
        .collect();
    let total = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), total);
}
