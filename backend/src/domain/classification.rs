/// What an owner has already logged: the film and that film's director.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorViewing {
    pub film_id: i64,
    pub director: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewingFlags {
    pub is_new_director: bool,
    pub is_rewatch: bool,
}

/// Flags for a new log of `film_id` by `director`, given every earlier log by the same owner.
///
/// Director matching is exact and case-sensitive. The flags are fixed at creation.
pub fn classify_on_create(prior: &[PriorViewing], film_id: i64, director: &str) -> ViewingFlags {
    ViewingFlags {
        is_new_director: !prior.iter().any(|p| p.director == director),
        is_rewatch: prior.iter().any(|p| p.film_id == film_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(film_id: i64, director: &str) -> PriorViewing {
        PriorViewing { film_id, director: director.to_string() }
    }

    #[test]
    fn test_first_log_is_new_director_and_not_rewatch() {
        let flags = classify_on_create(&[], 1, "Agnès Varda");
        assert!(flags.is_new_director);
        assert!(!flags.is_rewatch);
    }

    #[test]
    fn test_same_director_other_film() {
        let flags = classify_on_create(&[seen(1, "Agnès Varda")], 2, "Agnès Varda");
        assert!(!flags.is_new_director);
        assert!(!flags.is_rewatch);
    }

    #[test]
    fn test_rewatch_of_same_film() {
        let flags = classify_on_create(&[seen(1, "Agnès Varda"), seen(3, "Jacques Demy")], 1, "Agnès Varda");
        assert!(!flags.is_new_director);
        assert!(flags.is_rewatch);
    }

    #[test]
    fn test_director_match_is_case_sensitive() {
        let flags = classify_on_create(&[seen(1, "agnès varda")], 2, "Agnès Varda");
        assert!(flags.is_new_director);
    }
}
