//! Store - a record observable with per-field observables
//!
//! A `Store<T>` holds a whole record. [`Store::field`] projects one part of
//! it into a [`StoreField`], an observable of its own that stays in sync in
//! both directions:
//!
//! - updating the store pushes the projected value into every field, then
//!   notifies the store's subscribers
//! - updating a field writes the value back into the record and notifies the
//!   store's subscribers, then the field's own; sibling fields are left alone
//!
//! ## Example
//!
//! ```ignore
//! use postact_core::reactive::{Observe, Store};
//!
//! #[derive(Clone)]
//! struct Profile { name: String, age: u32 }
//!
//! let profile = Store::new(Profile { name: "Ada".into(), age: 36 });
//! let age = profile.field("age", |p: &Profile| p.age, |p, age| p.age = age);
//!
//! age.update(37);
//! assert_eq!(profile.value().age, 37);
//! ```

use core::any::Any;
use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::observable::{Observable, Observe};
use super::state::Updater;

type FieldSync<T> = Rc<dyn Fn(&T)>;

struct Fields<T: 'static> {
	syncs: Vec<FieldSync<T>>,
	cache: IndexMap<&'static str, Rc<dyn Any>>,
}

/// A record observable whose fields can be observed and updated separately.
///
/// Clones share the record, the subscribers and the fields.
pub struct Store<T: 'static> {
	observable: Observable<T>,
	fields: Rc<RefCell<Fields<T>>>,
}

impl<T: 'static> Clone for Store<T> {
	fn clone(&self) -> Self {
		Self {
			observable: self.observable.clone(),
			fields: Rc::clone(&self.fields),
		}
	}
}

impl<T: Clone + 'static> Store<T> {
	/// Creates a store holding `value` with no fields
	pub fn new(value: T) -> Self {
		Self {
			observable: Observable::new(value),
			fields: Rc::new(RefCell::new(Fields {
				syncs: Vec::new(),
				cache: IndexMap::new(),
			})),
		}
	}

	/// Assigns the record, refreshes every field and emits
	pub fn update(&self, updater: impl Into<Updater<T>>) {
		let value = updater.into().resolve(&self.observable);
		self.observable.set_value(value);

		let syncs = self.fields.borrow().syncs.clone();
		let value = self.observable.value();
		for sync in syncs {
			sync(&value);
		}
		self.observable.emit();
	}

	/// Like [`Store::update`] with the record computed from the current one
	pub fn update_with(&self, dispatch: impl FnOnce(&T) -> T + 'static) {
		self.update(Updater::Dispatch(Box::new(dispatch)));
	}

	/// Returns the field registered under `name`, creating it on first use.
	///
	/// `get` projects the field out of the record and `set` writes it back.
	/// A later call with the same name and field type returns the first
	/// field; a different field type under a taken name replaces it.
	pub fn field<F>(
		&self,
		name: &'static str,
		get: impl Fn(&T) -> F + 'static,
		set: impl Fn(&mut T, F) + 'static,
	) -> StoreField<F>
	where
		F: Clone + 'static,
	{
		let cached = self.fields.borrow().cache.get(name).cloned();
		if let Some(field) = cached.and_then(|field| field.downcast::<StoreField<F>>().ok()) {
			return (*field).clone();
		}

		let record = self.observable.downgrade();
		let write: Rc<dyn Fn(F)> = Rc::new(move |value: F| {
			if let Some(record) = record.upgrade() {
				let mut next = record.value();
				set(&mut next, value);
				record.set_value(next);
				record.emit();
			}
		});
		let field = StoreField {
			observable: Observable::new(self.observable.with_value(&get)),
			write,
		};

		let target = field.observable.downgrade();
		let sync: FieldSync<T> = Rc::new(move |record: &T| {
			if let Some(target) = target.upgrade() {
				target.set_value(get(record));
				target.emit();
			}
		});
		let mut fields = self.fields.borrow_mut();
		fields.syncs.push(sync);
		fields.cache.insert(name, Rc::new(field.clone()));
		field
	}

	/// Returns the number of fields created so far
	pub fn field_count(&self) -> usize {
		self.fields.borrow().cache.len()
	}
}

impl<T: 'static> Observe for Store<T> {
	type Value = T;

	fn observable(&self) -> &Observable<T> {
		&self.observable
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Store<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Store")
			.field("observable", &self.observable)
			.field("fields", &self.fields.borrow().cache.len())
			.finish()
	}
}

/// One projected part of a [`Store`]
pub struct StoreField<F: 'static> {
	observable: Observable<F>,
	write: Rc<dyn Fn(F)>,
}

impl<F: 'static> Clone for StoreField<F> {
	fn clone(&self) -> Self {
		Self {
			observable: self.observable.clone(),
			write: Rc::clone(&self.write),
		}
	}
}

impl<F: Clone + 'static> StoreField<F> {
	/// Assigns the field, writes it back into the record and emits
	pub fn update(&self, updater: impl Into<Updater<F>>) {
		let value = updater.into().resolve(&self.observable);
		self.observable.set_value(value.clone());
		(self.write)(value);
		self.observable.emit();
	}

	/// Like [`StoreField::update`] with the value computed from the current one
	pub fn update_with(&self, dispatch: impl FnOnce(&F) -> F + 'static) {
		self.update(Updater::Dispatch(Box::new(dispatch)));
	}
}

impl<F: 'static> Observe for StoreField<F> {
	type Value = F;

	fn observable(&self) -> &Observable<F> {
		&self.observable
	}
}

impl<F: fmt::Debug + 'static> fmt::Debug for StoreField<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StoreField")
			.field("observable", &self.observable)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::{Derived, Subscriber};
	use rstest::*;

	#[derive(Debug, Clone, PartialEq)]
	struct Profile {
		name: String,
		age: u32,
	}

	#[fixture]
	fn profile() -> Store<Profile> {
		Store::new(Profile {
			name: String::from("Ada"),
			age: 36,
		})
	}

	fn age(store: &Store<Profile>) -> StoreField<u32> {
		store.field("age", |p: &Profile| p.age, |p, age| p.age = age)
	}

	fn name(store: &Store<Profile>) -> StoreField<String> {
		store.field("name", |p: &Profile| p.name.clone(), |p, name| p.name = name)
	}

	fn recorder<T: Clone + 'static>(source: &impl Observe<Value = T>) -> Rc<RefCell<Vec<T>>> {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let subscriber: Subscriber<T> = {
			let seen = Rc::clone(&seen);
			Rc::new(move |value: &T| seen.borrow_mut().push(value.clone()))
		};
		source.subscribe(subscriber);
		seen
	}

	#[rstest]
	fn test_field_update_writes_back_into_record(profile: Store<Profile>) {
		// Arrange
		let age = age(&profile);
		let records = recorder(&profile);

		// Act
		age.update_with(|n| n + 1);

		// Assert
		assert_eq!(age.value(), 37);
		assert_eq!(profile.value().age, 37);
		assert_eq!(records.borrow().len(), 1);
	}

	#[rstest]
	fn test_store_update_refreshes_fields(profile: Store<Profile>) {
		// Arrange
		let age = age(&profile);
		let ages = recorder(&age);

		// Act
		profile.update(Profile {
			name: String::from("Grace"),
			age: 85,
		});

		// Assert
		assert_eq!(*ages.borrow(), vec![85]);
	}

	#[rstest]
	fn test_field_update_leaves_siblings_silent(profile: Store<Profile>) {
		// Arrange
		let age = age(&profile);
		let names = recorder(&name(&profile));

		// Act
		age.update(40);

		// Assert
		assert!(names.borrow().is_empty());
	}

	#[rstest]
	fn test_field_is_created_once_per_name(profile: Store<Profile>) {
		// Arrange
		let first = age(&profile);

		// Act
		let second = age(&profile);
		second.update(50);

		// Assert
		assert_eq!(profile.field_count(), 1);
		assert_eq!(first.value(), 50);
	}

	#[rstest]
	fn test_derived_over_field_follows_store(profile: Store<Profile>) {
		// Arrange
		let greeting = Derived::new(&name(&profile), |name: &String| format!("hi {name}"));

		// Act
		profile.update_with(|p| Profile {
			name: String::from("Grace"),
			..p.clone()
		});

		// Assert
		assert_eq!(greeting.value(), "hi Grace");
	}
}
