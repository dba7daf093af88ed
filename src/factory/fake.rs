//! Made-up names and lorem text.

use rand::{seq::SliceRandom, Rng};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Guido", "Hedy",
    "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Rob", "Sophie", "Tim", "Yukihiro", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Cerf", "Dijkstra", "Engelbart", "Floyd", "Hamilton", "Hopper", "Kay",
    "Knuth", "Lamport", "Liskov", "Lovelace", "McCarthy", "Perlman", "Ritchie", "Thompson",
    "Turing", "Wirth", "Wozniak",
];

const WORDS: &[&str] = &[
    "alias", "aperiam", "autem", "beatae", "commodi", "consequatur", "corporis", "dolor",
    "dolorem", "eius", "eos", "error", "fugiat", "harum", "ipsum", "iste", "laborum", "lorem",
    "magnam", "minima", "molestiae", "nesciunt", "nihil", "odit", "omnis", "pariatur", "quaerat",
    "quia", "quod", "ratione", "repellat", "saepe", "sed", "sit", "tempora", "ullam", "velit",
    "veniam", "voluptas", "voluptatem",
];

pub fn first_name<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, FIRST_NAMES)
}

pub fn last_name<R: Rng>(rng: &mut R) -> &'static str {
    pick(rng, LAST_NAMES)
}

/// `"First Last"`
pub fn name<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", first_name(rng), last_name(rng))
}

/// A capitalized sentence of `words` words ending with a period
pub fn sentence<R: Rng>(rng: &mut R, words: usize) -> String {
    let mut s = (0..words.max(1))
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = s.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    s.push('.');
    s
}

/// `sentences` sentences of three to eight words each
pub fn paragraph<R: Rng>(rng: &mut R, sentences: usize) -> String {
    (0..sentences.max(1))
        .map(|_| {
            let words = rng.gen_range(3..=8);
            sentence(rng, words)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase hex string of `len` digits
pub fn hex<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect()
}

fn pick<R: Rng>(rng: &mut R, from: &[&'static str]) -> &'static str {
    from.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn names_have_two_parts() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let name = name(&mut rng);
            let parts: Vec<_> = name.split(' ').collect();
            assert_eq!(parts.len(), 2);
            assert!(FIRST_NAMES.contains(&parts[0]));
            assert!(LAST_NAMES.contains(&parts[1]));
        }
    }

    #[test]
    fn sentence_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let s = sentence(&mut rng, 4);

        assert_eq!(s.split(' ').count(), 4);
        assert!(s.ends_with('.'));
        assert!(s.chars().next().unwrap().is_ascii_uppercase());
        assert_eq!(sentence(&mut rng, 0).split(' ').count(), 1);
    }

    #[test]
    fn paragraph_has_requested_sentences() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = paragraph(&mut rng, 5);
        assert_eq!(p.matches('.').count(), 5);
    }

    #[test]
    fn hex_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        let h = hex(&mut rng, 8);
        assert_eq!(h.len(), 8);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn same_seed_same_text() {
        let a = paragraph(&mut StdRng::seed_from_u64(42), 3);
        let b = paragraph(&mut StdRng::seed_from_u64(42), 3);
        assert_eq!(a, b);
    }
}
