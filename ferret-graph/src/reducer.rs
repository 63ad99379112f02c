//! Field-level merge policies used when applying a node's update.

use std::ops::Add;

pub trait Reducer<T>: Send + Sync {
    fn reduce(&self, current: T, update: T) -> T;
}

/// Last write wins.
pub struct Overwrite;
impl<T> Reducer<T> for Overwrite {
    fn reduce(&self, _current: T, update: T) -> T {
        update
    }
}

/// Concatenates the update after the current items.
pub struct Append;
impl<T> Reducer<Vec<T>> for Append {
    fn reduce(&self, mut current: Vec<T>, mut update: Vec<T>) -> Vec<T> {
        current.append(&mut update);
        current
    }
}

/// Adds the update to the current value.
pub struct AddCounter;
impl<T: Add<Output = T>> Reducer<T> for AddCounter {
    fn reduce(&self, current: T, update: T) -> T {
        current + update
    }
}
