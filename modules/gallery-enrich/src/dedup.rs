use crate::record::LocalPaintingRecord;

/// True if any record in `collection` has exactly the same title and artist.
///
/// The comparison is byte-exact: no case folding, trimming or Unicode
/// normalization, so "Starry Night" and "starry night" are distinct.
pub fn is_duplicate<'a, I>(candidate: &LocalPaintingRecord, collection: I) -> bool
where
    I: IntoIterator<Item = &'a LocalPaintingRecord>,
{
    collection
        .into_iter()
        .any(|existing| existing.title == candidate.title && existing.artist == candidate.artist)
}
