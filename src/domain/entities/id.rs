use std::fmt;
use std::marker::PhantomData;

/// Database-assigned identifier tagged with the entity it belongs to.
pub struct Id<T> {
    pub value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Id::new(value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::id::Id;

    struct TestEntity;

    #[test]
    fn test_id_new() {
        let id: Id<TestEntity> = Id::new(42);
        assert_eq!(id.value, 42)
    }

    #[test]
    fn test_id_from_i64() {
        let id: Id<TestEntity> = 7.into();
        assert_eq!(id, Id::new(7));
    }

    #[test]
    fn test_id_equality_ignores_marker() {
        let a: Id<TestEntity> = Id::new(1);
        let b: Id<TestEntity> = Id::new(2);
        assert_ne!(a, b);
        let copied = a;
        assert_eq!(a, copied);
    }

    #[test]
    fn test_id_display() {
        let id: Id<TestEntity> = Id::new(2);
        assert_eq!(id.to_string(), "2");
    }
}
