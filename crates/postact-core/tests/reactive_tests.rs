//! Observable integration tests
//!
//! Exercises the observable flavours together the way pages use them:
//! - Category 1: state updates and checkers
//! - Category 2: derived chains
//! - Category 3: asynchronous values
//! - Category 4: stores and text templates
//! - Category 5: properties

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use postact_core::reactive::Subscriber;
use postact_core::{
	Argument, ArgumentKind, Derived, IntoDynamic, Later, Node, Observe, State, Store,
	Subscribable, identify, later, to_node,
};
use proptest::prelude::*;
use rstest::rstest;

fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, Subscriber<T>) {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	let subscriber: Subscriber<T> = Rc::new(move |value: &T| sink.borrow_mut().push(value.clone()));
	(seen, subscriber)
}

// ============================================================================
// Category 1: State updates and checkers
// ============================================================================

#[rstest]
fn test_unchanged_values_are_rejected_by_checker() {
	// Arrange
	let name = State::new(String::from("a")).with_checker(|current, next| current != next);
	let (seen, subscriber) = recorder();
	name.subscribe(subscriber);

	// Act
	let same = name.update(String::from("a"));
	let different = name.update(String::from("b"));

	// Assert
	assert!(!same);
	assert!(different);
	assert_eq!(*seen.borrow(), vec![String::from("b")]);
}

#[rstest]
fn test_set_is_silent_until_emit() {
	// Arrange
	let count = State::new(0);
	let (seen, subscriber) = recorder();
	count.subscribe(subscriber);

	// Act
	count.set(3);
	let before_emit = seen.borrow().len();
	count.emit();

	// Assert
	assert_eq!(before_emit, 0);
	assert_eq!(*seen.borrow(), vec![3]);
}

// ============================================================================
// Category 2: Derived chains
// ============================================================================

#[rstest]
fn test_derived_chain_follows_its_root() {
	// Arrange
	let celsius = State::new(0.0_f64);
	let fahrenheit = Derived::new(&celsius, |c: &f64| c * 9.0 / 5.0 + 32.0);
	let label = Derived::new(&fahrenheit, |f: &f64| format!("{f}°F"));

	// Act
	celsius.update(100.0);

	// Assert
	assert_eq!(label.value(), "212°F");
}

#[rstest]
fn test_combined_sources_recompute_on_either() {
	// Arrange
	let first = State::new(String::from("Ada"));
	let last = State::new(String::from("Lovelace"));
	let full = Derived::combine2(&first, &last, |a: &String, b: &String| format!("{a} {b}"));

	// Act
	last.update(String::from("Byron"));
	first.update(String::from("Augusta"));

	// Assert
	assert_eq!(full.value(), "Augusta Byron");
}

#[rstest]
fn test_derived_argument_renders_current_value() {
	// Arrange
	let items = State::new(vec![1, 2, 3]);
	let total = Derived::new(&items, |items: &Vec<i32>| items.iter().sum::<i32>());

	// Act
	items.update(vec![10, 20]);
	let argument = Argument::from(&total);

	// Assert
	assert_eq!(identify(&argument), ArgumentKind::Observable);
	assert_eq!(to_node(argument).render_to_string(), "30");
}

#[rstest]
fn test_dynamic_watch_sees_classified_values() {
	// Arrange
	let flag = State::new(false);
	let dynamic = flag.clone().into_dynamic();
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	let subscription = dynamic.watch(Rc::new(move |argument: Argument| {
		sink.borrow_mut().push(argument.as_text());
	}));

	// Act
	flag.update(true);
	subscription.cancel();
	flag.update(false);

	// Assert
	assert_eq!(*seen.borrow(), vec![Some(String::from("true"))]);
}

// ============================================================================
// Category 3: Asynchronous values
// ============================================================================

#[rstest]
fn test_later_runs_finally_after_success() {
	// Arrange
	let finished = Rc::new(Cell::new(false));
	let (value, task) = later(async { Ok::<_, anyhow::Error>(7) });
	let value = {
		let finished = Rc::clone(&finished);
		value.finally(move || finished.set(true))
	};

	// Act
	futures::executor::block_on(task);

	// Assert
	assert!(value.is_ok());
	assert!(finished.get());
	assert_eq!(value.value(), Some(7));
}

#[rstest]
fn test_later_settles_once() {
	// Arrange
	let value = Later::<i32>::pending();
	let (seen, subscriber) = recorder();
	value.subscribe(subscriber);

	// Act
	value.resolve(1);
	value.resolve(2);
	value.reject(anyhow::anyhow!("late"));

	// Assert
	assert_eq!(*seen.borrow(), vec![Some(1)]);
	assert!(value.is_settled());
}

#[rstest]
fn test_unresolved_later_renders_nothing() {
	let value = Later::<String>::pending();
	let node: Node = to_node(Argument::from(&value));
	assert_eq!(node.render_to_string(), "");
}

// ============================================================================
// Category 4: Stores and text templates
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Todo {
	title: String,
	done: bool,
}

#[rstest]
fn test_store_field_renders_as_argument() {
	// Arrange
	let todo = Store::new(Todo {
		title: String::from("write"),
		done: false,
	});
	let title = todo.field("title", |t: &Todo| t.title.clone(), |t, title| t.title = title);
	let argument = Argument::from(&title);

	// Act
	todo.update_with(|t| Todo {
		title: String::from("test"),
		..t.clone()
	});

	// Assert
	assert_eq!(identify(&argument), ArgumentKind::Observable);
	assert_eq!(to_node(argument).render_to_string(), "test");
}

#[rstest]
fn test_text_over_store_fields() {
	// Arrange
	let todo = Store::new(Todo {
		title: String::from("write"),
		done: false,
	});
	let title = todo.field("title", |t: &Todo| t.title.clone(), |t, title| t.title = title);
	let done = todo.field("done", |t: &Todo| t.done, |t, done| t.done = done);
	let line = postact_core::text!("" {&title} ": " {&done} "");

	// Act
	done.update(true);

	// Assert
	assert_eq!(line.value(), "write: true");
	assert!(todo.value().done);
}

#[rstest]
fn test_text_as_argument_tracks_flip() {
	// Arrange
	let open = State::new(false);
	let label = postact_core::text!("open=" {&open} "");
	let argument = Argument::from(&label);

	// Act
	open.flip();

	// Assert
	assert_eq!(argument.as_text(), Some(String::from("open=true")));
}

// ============================================================================
// Category 5: Properties
// ============================================================================

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	/// Property: every accepted update reaches subscribers in order
	#[rstest]
	fn test_subscribers_see_every_update(values in prop::collection::vec(any::<i32>(), 0..32)) {
		let state = State::new(0);
		let (seen, subscriber) = recorder();
		state.subscribe(subscriber);

		for value in &values {
			state.update(*value);
		}

		prop_assert_eq!(seen.borrow().clone(), values);
	}

	/// Property: a derived value always equals its generator over the source
	#[rstest]
	fn test_derived_tracks_source(values in prop::collection::vec(-1000i64..1000, 1..16)) {
		let source = State::new(0_i64);
		let doubled = Derived::new(&source, |n: &i64| n * 2);

		for value in &values {
			source.update(*value);
			prop_assert_eq!(doubled.value(), value * 2);
		}
	}

	/// Property: aggregating many sources sums their current values
	#[rstest]
	fn test_from_all_sums_sources(initial in prop::collection::vec(0u32..100, 1..8), bump in 0u32..100) {
		let sources: Vec<State<u32>> = initial.iter().copied().map(State::new).collect();
		let total = Derived::from_all(&sources, |values: &[u32]| values.iter().sum::<u32>());

		sources[0].update_with(move |n| n + bump);

		prop_assert_eq!(total.value(), initial.iter().sum::<u32>() + bump);
	}
}
