//! End-to-end checks of the table as semantic analysis and code generation use it.

use crate::{Kind, Segment, Storage, SymbolTable};

/// Declarations for:
///
/// ```text
/// class Ball {
///     static int count;
///     field int x, y;
///     field Ball next;
///
///     method void move(int dx, int dy) {
///         var int x, tmp;
///         ...
///     }
///
///     function Ball make(int x) { ... }
/// }
/// ```
fn ball() -> SymbolTable {
	let mut table = SymbolTable::new();
	table.define("count", "int", Kind::Static);
	table.define("x", "int", Kind::Field);
	table.define("y", "int", Kind::Field);
	table.define("next", "Ball", Kind::Field);
	table
}

#[test]
fn class_scope_scenarios() {
	assert_eq!(SymbolTable::new().var_count(Kind::Field), 0);

	let table = ball();
	assert_eq!(table.var_count(Kind::Static), 1);
	assert_eq!(table.var_count(Kind::Field), 3);
	assert_eq!(table.index_of("y"), Some(1));
	assert_eq!(table.type_of("next"), Some("Ball"));
	assert_eq!(table.kind_of("count"), Kind::Static);

	// Known sharp edge: undefined names look like fields.
	assert_eq!(table.kind_of("unknown_name"), Kind::Field);
	assert_eq!(table.index_of("unknown_name"), None);
}

#[test]
fn subroutine_lifecycle() {
	let mut table = ball();

	table.start_subroutine();
	assert_eq!(table.define("this", "Ball", Kind::Arg), 0);
	assert_eq!(table.define("dx", "int", Kind::Arg), 1);
	assert_eq!(table.define("dy", "int", Kind::Arg), 2);
	assert_eq!(table.define("x", "int", Kind::Var), 0);
	assert_eq!(table.define("tmp", "int", Kind::Var), 1);

	assert_eq!(
		table.storage_of("dy"),
		Some(Storage {
			segment: Segment::Argument,
			index: 2
		})
	);
	assert_eq!(table.kind_of("x"), Kind::Var);
	assert_eq!(table.index_of("x"), Some(0));
	assert_eq!(table.storage_of("y").unwrap().to_string(), "this 1");

	table.start_subroutine();
	assert_eq!(table.var_count(Kind::Arg), 0);
	assert_eq!(table.var_count(Kind::Var), 0);
	assert_eq!(table.var_count(Kind::Static), 1);
	assert_eq!(table.var_count(Kind::Field), 3);

	assert_eq!(table.define("x", "int", Kind::Arg), 0);
	assert_eq!(table.kind_of("x"), Kind::Arg);
	assert_eq!(table.storage_of("x").unwrap().to_string(), "argument 0");
	assert!(table.resolve("tmp").is_none());
	assert_eq!(table.kind_of("x"), table.resolve("x").unwrap().kind());
}

#[test]
fn string_kinds() {
	let mut table = SymbolTable::new();
	table.start_subroutine();

	for (name, kind) in [("a", "ARG"), ("b", "VAR"), ("c", "STATIC"), ("d", "FIELD")] {
		table.define(name, "int", kind.parse().unwrap());
	}

	for kind in Kind::ALL {
		assert_eq!(table.var_count(kind), 1);
	}

	assert!("GLOBAL".parse::<Kind>().is_err());
}
