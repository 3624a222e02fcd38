//! Typed index collections.
//!
//! Cubies live in a single arena and are referred to by index. Wrapping the
//! index in a newtype keeps a cubie ID from being confused with a layer index
//! or a count.

use std::fmt;
use std::marker::PhantomData;

/// Error when a [`TypedIndex`] exceeds its maximum value.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("exceeded maximum {type_name} count of {max_value}")]
pub struct IndexOverflow {
    /// Name of the indexing type.
    pub type_name: &'static str,
    /// Maximum allowed index for the indexing type.
    pub max_value: usize,
}

/// Error when a [`TypedIndex`] is out of bounds for a collection.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("{type_name} index out of range")]
pub struct IndexOutOfRange {
    /// Name of the indexing type.
    pub type_name: &'static str,
}

/// Typed index, usually a wrapper around a primitive unsigned integer.
///
/// Define these with [`typed_index_struct!`](crate::typed_index_struct).
pub trait TypedIndex:
    'static + fmt::Debug + fmt::Display + Copy + Eq + Ord + std::hash::Hash + Send + Sync
{
    /// Maximum index representable by the type.
    const MAX_INDEX: usize;
    /// User-friendly type name (lowercase).
    const TYPE_NAME: &'static str;

    /// Returns the index as a `usize`.
    fn to_index(self) -> usize;

    /// Returns an index from a `usize`, or an error if it does not fit.
    fn try_from_index(index: usize) -> Result<Self, IndexOverflow>;
}

/// Defines a struct that wraps a primitive unsigned integer and implements
/// [`TypedIndex`] on it.
#[macro_export]
macro_rules! typed_index_struct {
    (
        $(#[$attr:meta])*
        $struct_vis:vis struct $struct_name:ident($inner_vis:vis $inner_type:ty);
    ) => {
        $(#[$attr])*
        #[derive(Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        $struct_vis struct $struct_name($inner_vis $inner_type);

        impl ::std::fmt::Debug for $struct_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "#{:?}", self.0)
            }
        }
        impl ::std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }

        impl $crate::ti::TypedIndex for $struct_name {
            const MAX_INDEX: usize = <$inner_type>::MAX as usize;
            const TYPE_NAME: &'static str = stringify!($struct_name);

            fn to_index(self) -> usize {
                self.0 as usize
            }

            fn try_from_index(index: usize) -> Result<Self, $crate::ti::IndexOverflow> {
                match index.try_into() {
                    Ok(i) => Ok(Self(i)),
                    Err(_) => Err($crate::ti::IndexOverflow {
                        type_name: Self::TYPE_NAME,
                        max_value: Self::MAX_INDEX,
                    }),
                }
            }
        }
    };
}

/// Wrapper around a `Vec<E>` that is indexed using a typed index.
#[derive(Clone, PartialEq)]
pub struct TiVec<I, E> {
    values: Vec<E>,
    _phantom: PhantomData<I>,
}

impl<I, E: fmt::Debug> fmt::Debug for TiVec<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

impl<I, E> Default for TiVec<I, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, E> TiVec<I, E> {
    /// Constructs a new empty vector.
    pub const fn new() -> Self {
        TiVec {
            values: vec![],
            _phantom: PhantomData,
        }
    }

    /// Returns whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// Returns the number of elements in the collection.
    pub fn len(&self) -> usize {
        self.values.len()
    }
    /// Removes every element, invalidating all existing indexes.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns an iterator over the values in the collection.
    pub fn iter_values(&self) -> std::slice::Iter<'_, E> {
        self.values.iter()
    }
}

impl<I: TypedIndex, E> TiVec<I, E> {
    /// Adds an element to the end of the vector and returns its index.
    pub fn push(&mut self, value: E) -> Result<I, IndexOverflow> {
        let idx = I::try_from_index(self.len())?;
        self.values.push(value);
        Ok(idx)
    }

    /// Returns a reference to the element at `index`, or an error if the index
    /// is out of range.
    pub fn get(&self, index: I) -> Result<&E, IndexOutOfRange> {
        self.values.get(index.to_index()).ok_or(IndexOutOfRange {
            type_name: I::TYPE_NAME,
        })
    }
    /// Returns a mutable reference to the element at `index`, or an error if
    /// the index is out of range.
    pub fn get_mut(&mut self, index: I) -> Result<&mut E, IndexOutOfRange> {
        self.values
            .get_mut(index.to_index())
            .ok_or(IndexOutOfRange {
                type_name: I::TYPE_NAME,
            })
    }

    /// Returns an iterator over the index-value pairs in the collection.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (I, &E)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, e)| Some((I::try_from_index(i).ok()?, e)))
    }

    /// Returns an iterator over keys for which a predicate returns `true`.
    pub fn iter_filter<'a>(
        &'a self,
        mut pred: impl 'a + FnMut(I, &E) -> bool,
    ) -> impl 'a + DoubleEndedIterator<Item = I> {
        self.iter().filter(move |&(i, e)| pred(i, e)).map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    typed_index_struct! {
        struct Tiny(u8);
    }

    #[test]
    fn test_push_until_overflow() {
        let mut v = TiVec::<Tiny, ()>::new();
        for i in 0..=255 {
            assert_eq!(v.push(()), Ok(Tiny(i)));
        }
        assert_eq!(
            v.push(()),
            Err(IndexOverflow {
                type_name: "Tiny",
                max_value: 255,
            }),
        );
        assert_eq!(v.len(), 256);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut v = TiVec::<Tiny, char>::new();
        let a = v.push('a').unwrap();
        assert_eq!(v.get(a), Ok(&'a'));
        assert!(v.get(Tiny(1)).is_err());
        assert_eq!(v.iter_filter(|_, &c| c == 'a').collect::<Vec<_>>(), vec![a]);
        v.clear();
        assert!(v.get(a).is_err());
    }
}
