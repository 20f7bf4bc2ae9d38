//! Facade integration tests
//!
//! Builds a small interactive page using only `postact::prelude`.

use postact::prelude::*;
use rstest::rstest;

#[rstest]
fn test_counter_page_through_prelude() {
	// Arrange
	let document = Document::new();
	let _active = document.enter();
	let root = document.create_element("main");
	let count = State::new(0);
	let increment = {
		let count = count.clone();
		EventHandler::new(move |_| {
			count.update_with(|n| n + 1);
		})
	};
	let page = html!(
		"<div><button onclick=" {increment} ">+</button><span>" {&count} "</span></div>"
	)
	.unwrap();

	// Act
	let mounted = render(&root, page, &RealizeOptions::default()).unwrap();
	let button = root
		.first_child()
		.and_then(|div| div.first_child())
		.unwrap();
	button.dispatch_event("click");
	button.dispatch_event("click");

	// Assert
	assert_eq!(root.text_content(), "+2");
	mounted.kill();
	count.update(5);
	assert_eq!(root.text_content(), "+2");
}

#[rstest]
fn test_list_component_through_prelude() {
	// Arrange
	let document = Document::new();
	let _active = document.enter();
	let root = document.create_element("ol");
	let names = State::new(vec![String::from("a"), String::from("b")]);
	let list = for_each(&names, |name: &String| {
		ElementNode::new("li").child(name.clone()).into()
	});

	// Act
	let _mounted = render(&root, list, &RealizeOptions::default()).unwrap();
	names.update(vec![String::from("c")]);

	// Assert
	assert_eq!(root.inner_html(), "<!----><li>c</li><!---->");
}

#[rstest]
fn test_text_template_through_prelude() {
	// Arrange
	let document = Document::new();
	let _active = document.enter();
	let root = document.create_element("p");
	let name = State::new(String::from("Ada"));
	let greeting = text!("Hello, " {&name} "!");
	let node = html!("<span>" {&greeting} "</span>").unwrap();
	let _mounted = render(&root, node, &RealizeOptions::default()).unwrap();

	// Act
	name.push(" Lovelace");

	// Assert
	assert_eq!(root.text_content(), "Hello, Ada Lovelace!");
}
