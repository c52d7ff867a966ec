use crate::domain_model::UserId;
use std::collections::BTreeSet;

/// Union of every inclusion source, then minus `excluded`.
///
/// Exclusion runs only after the union is complete, so an id that qualifies
/// through several sources is still dropped if it appears in `excluded`.
pub(crate) fn resolve_audience<'a, I>(sources: I, excluded: &[UserId]) -> BTreeSet<UserId>
where
    I: IntoIterator<Item = &'a [UserId]>,
{
    let mut audience: BTreeSet<UserId> = sources
        .into_iter()
        .flat_map(|ids| ids.iter().copied())
        .collect();
    for id in excluded {
        audience.remove(id);
    }
    audience
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<UserId> {
        raw.iter().copied().map(UserId).collect()
    }

    #[test]
    fn union_of_sources_without_duplicates() {
        let friends = ids(&[2, 3]);
        let subscribers = ids(&[3, 4]);
        let mentioned = ids(&[5]);
        let audience = resolve_audience(
            [friends.as_slice(), subscribers.as_slice(), mentioned.as_slice()],
            &[],
        );
        assert_eq!(audience.into_iter().collect::<Vec<_>>(), ids(&[2, 3, 4, 5]));
    }

    #[test]
    fn exclusion_wins_over_every_source() {
        let friends = ids(&[2, 3]);
        let subscribers = ids(&[3]);
        let mentioned = ids(&[3, 4]);
        let audience = resolve_audience(
            [friends.as_slice(), subscribers.as_slice(), mentioned.as_slice()],
            &ids(&[3]),
        );
        assert_eq!(audience.into_iter().collect::<Vec<_>>(), ids(&[2, 4]));
    }

    #[test]
    fn excluding_unknown_ids_is_harmless() {
        let friends = ids(&[2]);
        let audience = resolve_audience([friends.as_slice()], &ids(&[9]));
        assert_eq!(audience.len(), 1);
    }
}
