use std::collections::{BTreeSet, HashSet, VecDeque};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::api::bind::*;

/// A binder that assigns a single converted token into a field of the destination.
pub struct Scalar<T, V> {
    access: Box<dyn Fn(&mut T) -> &mut V + Send + Sync>,
}

impl<T, V> ValueBinder for Scalar<T, V> {}

impl<T, V> Scalar<T, V> {
    /// Create a scalar binder over a field accessor.
    pub fn new(access: impl Fn(&mut T) -> &mut V + Send + Sync + 'static) -> Self {
        Self {
            access: Box::new(access),
        }
    }
}

impl<T, V> Bindable<T> for Scalar<T, V>
where
    V: FromStr,
{
    fn matched(&self, _target: &mut T) {
        // Do nothing.
    }

    fn capture(&self, target: &mut T, token: &str) -> Result<(), ConvertError> {
        let value = V::from_str(token)
            .map_err(|_| ConvertError::new(token, std::any::type_name::<V>()))?;
        *(self.access)(target) = value;
        Ok(())
    }
}

/// A binder that assigns a pre-declared value into a field of the destination on a bare match.
pub struct Switch<T, V> {
    access: Box<dyn Fn(&mut T) -> &mut V + Send + Sync>,
    value: V,
}

impl<T, V> BareBinder for Switch<T, V> {}

impl<T, V> Switch<T, V> {
    /// Create a switch binder over a field accessor and the value to assign.
    pub fn new(access: impl Fn(&mut T) -> &mut V + Send + Sync + 'static, value: V) -> Self {
        Self {
            access: Box::new(access),
            value,
        }
    }
}

impl<T, V> Bindable<T> for Switch<T, V>
where
    V: Clone,
{
    fn matched(&self, target: &mut T) {
        // Clone, not take: the registry re-applies this binder across resolutions.
        *(self.access)(target) = self.value.clone();
    }

    fn capture(&self, _target: &mut T, _token: &str) -> Result<(), ConvertError> {
        unreachable!("internal error - must not capture on a Switch");
    }
}

/// A binder that runs an arbitrary mutation of the destination on a bare match.
pub struct Trigger<T> {
    action: Box<dyn Fn(&mut T) + Send + Sync>,
}

impl<T> BareBinder for Trigger<T> {}

impl<T> Trigger<T> {
    /// Create a trigger binder over a mutation of the destination.
    pub fn new(action: impl Fn(&mut T) + Send + Sync + 'static) -> Self {
        Self {
            action: Box::new(action),
        }
    }
}

impl<T> Bindable<T> for Trigger<T> {
    fn matched(&self, target: &mut T) {
        (self.action)(target);
    }

    fn capture(&self, _target: &mut T, _token: &str) -> Result<(), ConvertError> {
        unreachable!("internal error - must not capture on a Trigger");
    }
}

/// A binder that wraps a single converted token into [`Option::Some`].
pub struct Optional<T, V> {
    access: Box<dyn Fn(&mut T) -> &mut Option<V> + Send + Sync>,
}

impl<T, V> ValueBinder for Optional<T, V> {}

impl<T, V> Optional<T, V> {
    /// Create an optional binder over an `Option` field accessor.
    pub fn new(access: impl Fn(&mut T) -> &mut Option<V> + Send + Sync + 'static) -> Self {
        Self {
            access: Box::new(access),
        }
    }
}

impl<T, V> Bindable<T> for Optional<T, V>
where
    V: FromStr,
{
    fn matched(&self, _target: &mut T) {
        // Do nothing.
    }

    fn capture(&self, target: &mut T, token: &str) -> Result<(), ConvertError> {
        let value = V::from_str(token)
            .map_err(|_| ConvertError::new(token, std::any::type_name::<V>()))?;
        (self.access)(target).replace(value);
        Ok(())
    }
}

/// A binder that converts each token of a batch and accumulates the results into a collection field.
pub struct Collection<T, C, V> {
    access: Box<dyn Fn(&mut T) -> &mut C + Send + Sync>,
    _phantom: PhantomData<V>,
}

impl<T, C, V> BatchBinder for Collection<T, C, V> {}

impl<T, C, V> Collection<T, C, V> {
    /// Create a collection binder over a collection field accessor.
    pub fn new(access: impl Fn(&mut T) -> &mut C + Send + Sync + 'static) -> Self {
        Self {
            access: Box::new(access),
            _phantom: PhantomData,
        }
    }
}

impl<T, C, V> Bindable<T> for Collection<T, C, V>
where
    V: FromStr,
    C: Accumulate<V>,
{
    fn matched(&self, _target: &mut T) {
        // Do nothing.
    }

    fn capture(&self, target: &mut T, token: &str) -> Result<(), ConvertError> {
        let value = V::from_str(token)
            .map_err(|_| ConvertError::new(token, std::any::type_name::<V>()))?;
        (self.access)(target).accumulate(value);
        Ok(())
    }
}

/// Behaviour to accumulate converted tokens one at a time.
///
/// Must provide exactly one implementation per collection type, so that the item type stays
/// inferrable from the collection field alone.
pub trait Accumulate<V> {
    /// Take the item into the collection.
    fn accumulate(&mut self, item: V);
}

impl<V> Accumulate<V> for Vec<V> {
    fn accumulate(&mut self, item: V) {
        self.push(item);
    }
}

impl<V> Accumulate<V> for VecDeque<V> {
    fn accumulate(&mut self, item: V) {
        self.push_back(item);
    }
}

impl<V: Eq + std::hash::Hash> Accumulate<V> for HashSet<V> {
    fn accumulate(&mut self, item: V) {
        self.insert(item);
    }
}

impl<V: Ord> Accumulate<V> for BTreeSet<V> {
    fn accumulate(&mut self, item: V) {
        self.insert(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Eq)]
    struct Bucket {
        number: u32,
        flag: bool,
        maybe: Option<u32>,
        items: Vec<u32>,
        unique: HashSet<u32>,
    }

    #[test]
    fn vec() {
        let mut collection: Vec<u32> = Vec::default();
        collection.accumulate(1);
        collection.accumulate(0);
        assert_eq!(collection, vec![1, 0]);
    }

    #[test]
    fn vec_deque() {
        let mut collection: VecDeque<u32> = VecDeque::default();
        collection.accumulate(1);
        collection.accumulate(0);
        assert_eq!(collection, VecDeque::from([1, 0]));
    }

    #[test]
    fn hash_set() {
        let mut collection: HashSet<u32> = HashSet::default();
        collection.accumulate(1);
        collection.accumulate(0);
        collection.accumulate(1);
        assert_eq!(collection, HashSet::from([1, 0]));
    }

    #[test]
    fn b_tree_set() {
        let mut collection: BTreeSet<u32> = BTreeSet::default();
        collection.accumulate(1);
        collection.accumulate(0);
        collection.accumulate(1);
        assert_eq!(collection, BTreeSet::from([0, 1]));
    }

    #[test]
    fn scalar_capture() {
        // Setup
        let mut bucket = Bucket::default();
        let scalar = Scalar::new(|b: &mut Bucket| &mut b.number);

        // Execute
        scalar.capture(&mut bucket, "5").unwrap();

        // Verify
        assert_eq!(bucket.number, 5);
    }

    #[test]
    fn scalar_capture_invalid() {
        // Setup
        let mut bucket = Bucket::default();
        let scalar = Scalar::new(|b: &mut Bucket| &mut b.number);

        // Execute
        let error = scalar.capture(&mut bucket, "blah").unwrap_err();

        // Verify
        assert_eq!(error.token, "blah".to_string());
        assert_eq!(error.type_name, "u32");
        assert_eq!(bucket.number, 0);
    }

    #[test]
    fn scalar_matched() {
        // Setup
        let mut bucket = Bucket::default();
        let scalar = Scalar::new(|b: &mut Bucket| &mut b.number);

        // Execute
        scalar.matched(&mut bucket);

        // Verify
        assert_eq!(bucket.number, 0);
    }

    #[test]
    fn switch_matched() {
        // Setup
        let mut bucket = Bucket::default();
        let switch = Switch::new(|b: &mut Bucket| &mut b.flag, true);

        // Execute
        switch.matched(&mut bucket);

        // Verify
        assert!(bucket.flag);
    }

    #[test]
    fn switch_matched_repeatedly() {
        // Setup
        let mut bucket = Bucket::default();
        let switch = Switch::new(|b: &mut Bucket| &mut b.number, 2);

        // Execute
        switch.matched(&mut bucket);
        bucket.number = 7;
        switch.matched(&mut bucket);

        // Verify
        assert_eq!(bucket.number, 2);
    }

    #[test]
    #[should_panic]
    fn switch_capture() {
        // Setup
        let mut bucket = Bucket::default();
        let switch = Switch::new(|b: &mut Bucket| &mut b.flag, true);

        // Execute & verify
        let _ = switch.capture(&mut bucket, "5");
    }

    #[test]
    fn trigger_matched() {
        // Setup
        let mut bucket = Bucket::default();
        let trigger = Trigger::new(|b: &mut Bucket| b.number += 1);

        // Execute
        trigger.matched(&mut bucket);
        trigger.matched(&mut bucket);

        // Verify
        assert_eq!(bucket.number, 2);
    }

    #[test]
    #[should_panic]
    fn trigger_capture() {
        // Setup
        let mut bucket = Bucket::default();
        let trigger = Trigger::new(|b: &mut Bucket| b.flag = true);

        // Execute & verify
        let _ = trigger.capture(&mut bucket, "5");
    }

    #[test]
    fn optional_capture() {
        // Setup
        let mut bucket = Bucket::default();
        let optional = Optional::new(|b: &mut Bucket| &mut b.maybe);

        // Execute
        optional.capture(&mut bucket, "1").unwrap();

        // Verify
        assert_eq!(bucket.maybe, Some(1));
    }

    #[test]
    fn optional_matched() {
        // Setup
        let mut bucket = Bucket::default();
        let optional = Optional::new(|b: &mut Bucket| &mut b.maybe);

        // Execute
        optional.matched(&mut bucket);

        // Verify
        assert_eq!(bucket.maybe, None);
    }

    #[test]
    fn collection_capture() {
        // Setup
        let mut bucket = Bucket::default();
        let collection = Collection::new(|b: &mut Bucket| &mut b.items);

        // Execute
        collection.capture(&mut bucket, "1").unwrap();
        collection.capture(&mut bucket, "0").unwrap();

        // Verify
        assert_eq!(bucket.items, vec![1, 0]);
    }

    #[test]
    fn collection_capture_hash_set() {
        // Setup
        let mut bucket = Bucket::default();
        let collection = Collection::new(|b: &mut Bucket| &mut b.unique);

        // Execute
        collection.capture(&mut bucket, "1").unwrap();
        collection.capture(&mut bucket, "0").unwrap();
        collection.capture(&mut bucket, "1").unwrap();

        // Verify
        assert_eq!(bucket.unique, HashSet::from([0, 1]));
    }

    #[test]
    fn collection_capture_invalid() {
        // Setup
        let mut bucket = Bucket::default();
        let collection = Collection::new(|b: &mut Bucket| &mut b.items);

        // Execute
        let error = collection.capture(&mut bucket, "blah").unwrap_err();

        // Verify
        assert_eq!(error.token, "blah".to_string());
        assert_eq!(error.type_name, "u32");
        assert_eq!(bucket.items, Vec::<u32>::default());
    }
}
