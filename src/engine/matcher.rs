/// Unaccented letters accepted in place of an accented vowel. Lowercase targets
/// take only the lowercase base letter; uppercase targets take either case.
fn accent_alternatives(expected: char) -> &'static [char] {
    match expected {
        'à' => &['a'],
        'À' => &['a', 'A'],
        'è' | 'é' => &['e'],
        'È' | 'É' => &['e', 'E'],
        'ì' => &['i'],
        'Ì' => &['i', 'I'],
        'ò' => &['o'],
        'Ò' => &['o', 'O'],
        'ù' => &['u'],
        'Ù' => &['u', 'U'],
        _ => &[],
    }
}

pub fn accepts(expected: char, typed: char) -> bool {
    typed == expected || accent_alternatives(expected).contains(&typed)
}
