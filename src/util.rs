use crate::avl::Link;

/// What a recursive removal hands back to its parent: the subtree that now
/// takes the visited node's place, and the removed value if anything matched.
pub(crate) enum Removal<T> {
    /// Nothing compared equal. The subtree is returned untouched.
    NotFound(Link<T>),
    /// A value was removed somewhere in the subtree, which may have been
    /// restructured (or emptied) as a result.
    Removed { subtree: Link<T>, value: T },
}
