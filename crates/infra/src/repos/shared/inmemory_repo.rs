use agenda_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn find_many<T: Clone + Entity>(val_ids: &[ID], collection: &Mutex<Vec<T>>) -> Vec<T> {
    find_by(collection, |item| val_ids.contains(item.id()))
}

/// Applies `update` to every item matching `compare` and returns how many
/// items were updated
pub fn update_many<T, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> u64 {
    let mut collection = collection.lock().unwrap();
    let mut updated = 0;
    for item in collection.iter_mut() {
        if compare(item) {
            update(item);
            updated += 1;
        }
    }
    updated
}
