//! Drives [`SymbolTable`]s from a line-oriented declaration trace.
//!
//! ```text
//! class Main
//! static int count
//! field int x, y
//! subroutine run
//! arg Main this
//! var Array a, b
//! resolve x
//! ```
//!
//! Blank lines and `//` comments are skipped. Every `class` line starts a
//! fresh table, every `subroutine` line resets the subroutine scope, and every
//! `resolve` line records what code generation would see for that name.

use tracing::{debug, info};

use crate::{Config, Entry, Error, FxIndexMap, Kind, Storage, SymbolTable, UnknownNames};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	pub class: String,
	pub subroutine: Option<String>,
	pub name: String,
	pub kind: Kind,
	/// `None` if the name was undefined and aliased to a field.
	pub storage: Option<Storage>,
	/// The declared type of the same entry `storage` points at.
	pub ty: Option<String>,
}

impl std::fmt::Display for Resolution {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.class)?;

		if let Some(sub) = &self.subroutine {
			write!(f, ".{sub}")?;
		}

		match (&self.storage, &self.ty) {
			(Some(storage), Some(ty)) => write!(f, ": {} -> {storage} ({ty})", self.name),
			(Some(storage), None) => write!(f, ": {} -> {storage}", self.name),
			(None, _) => write!(f, ": {} -> {} (undefined)", self.name, self.kind),
		}
	}
}

#[derive(Debug, Default)]
pub struct Report {
	/// The final state of each class's table, in trace order.
	pub tables: FxIndexMap<String, SymbolTable>,
	pub resolutions: Vec<Resolution>,
}

impl std::fmt::Display for Report {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for res in &self.resolutions {
			writeln!(f, "{res}")?;
		}

		Ok(())
	}
}

pub fn replay(text: &str, cfg: &Config) -> Result<Report, Error> {
	let mut report = Report::default();
	let mut class: Option<String> = None;
	let mut subroutine: Option<String> = None;

	for (i, line) in text.lines().enumerate() {
		let lineno = i + 1;
		let line = line.split("//").next().unwrap_or_default().trim();

		let Some((directive, rest)) = split_directive(line) else {
			continue;
		};

		let script_err = |ctx: String| Error::Script { line: lineno, ctx };

		if directive == "class" {
			let name = single_ident(rest)
				.ok_or_else(|| script_err("expected a class name".to_string()))?;

			if report.tables.contains_key(name) {
				return Err(script_err(format!("class `{name}` declared twice")));
			}

			debug!("Compiling class `{name}`.");
			report.tables.insert(name.to_string(), SymbolTable::new());
			class = Some(name.to_string());
			subroutine = None;
			continue;
		}

		let current = report.tables.last_mut().map(|(_, table)| table);

		let (Some(class_name), Some(table)) = (class.as_ref(), current) else {
			return Err(script_err(format!("`{directive}` outside of any class")));
		};

		match directive {
			"subroutine" => {
				let name = single_ident(rest)
					.ok_or_else(|| script_err("expected a subroutine name".to_string()))?;
				table.start_subroutine();
				subroutine = Some(name.to_string());
			}
			"resolve" => {
				let name =
					single_ident(rest).ok_or_else(|| script_err("expected a name".to_string()))?;

				let entry = table.resolve(name);

				if entry.is_none() && cfg.unknown_names == UnknownNames::Reject {
					return Err(Error::UnknownName(name.to_string()));
				}

				report.resolutions.push(Resolution {
					class: class_name.clone(),
					subroutine: subroutine.clone(),
					name: name.to_string(),
					kind: table.kind_of(name),
					storage: entry.map(Entry::storage),
					ty: entry.map(|e| e.ty().to_string()),
				});
			}
			other => {
				let kind = other.parse::<Kind>().map_err(|err| script_err(err.to_string()))?;

				let Some((ty, names)) = split_directive(rest) else {
					return Err(script_err(format!("expected a type after `{other}`")));
				};

				for name in names.split(',').map(str::trim) {
					if single_ident(name).is_none() {
						return Err(script_err(format!("malformed name list: `{names}`")));
					}

					table.define(name, ty, kind);
				}
			}
		}
	}

	info!(
		"Replayed {} resolutions across {} classes.",
		report.resolutions.len(),
		report.tables.len()
	);

	Ok(report)
}

/// Splits a trimmed line into its first word and the trimmed remainder.
/// Returns `None` for empty lines.
#[must_use]
fn split_directive(line: &str) -> Option<(&str, &str)> {
	if line.is_empty() {
		return None;
	}

	match line.split_once(char::is_whitespace) {
		Some((head, rest)) => Some((head, rest.trim())),
		None => Some((line, "")),
	}
}

#[must_use]
fn single_ident(text: &str) -> Option<&str> {
	let mut chars = text.chars();
	let first = chars.next()?;

	if !(first.is_ascii_alphabetic() || first == '_') {
		return None;
	}

	chars
		.all(|c| c.is_ascii_alphanumeric() || c == '_')
		.then_some(text)
}

#[cfg(test)]
mod test {
	use indoc::indoc;

	use super::*;

	const SOURCE: &str = indoc! {"
		// Two classes, one shadowed field.
		class Main
		static int count
		field int x, y

		subroutine run
		arg Main this
		var Array a, b
		var boolean x
		resolve x
		resolve y
		resolve b
		resolve count

		subroutine stop
		resolve a // reset along with the rest of `run`

		class Point
		field int x
		resolve x
	"};

	#[test]
	fn smoke() {
		let report = replay(SOURCE, &Config::default()).unwrap();

		let lines = report.to_string();
		let lines = lines.lines().collect::<Vec<_>>();

		assert_eq!(
			lines,
			[
				"Main.run: x -> local 2 (boolean)",
				"Main.run: y -> this 1 (int)",
				"Main.run: b -> local 1 (Array)",
				"Main.run: count -> static 0 (int)",
				"Main.stop: a -> FIELD (undefined)",
				"Point: x -> this 0 (int)",
			]
		);

		assert_eq!(report.tables.len(), 2);
		assert_eq!(report.tables.get_index(0).unwrap().0, "Main");

		let main = &report.tables["Main"];
		assert_eq!(main.var_count(Kind::Field), 2);
		assert_eq!(main.var_count(Kind::Var), 0);
	}

	#[test]
	fn shadowing_local_reports_own_type() {
		let source = "class M\nfield int x\nsubroutine f\nvar boolean x\nresolve x\n";
		let report = replay(source, &Config::default()).unwrap();

		assert_eq!(report.to_string(), "M.f: x -> local 0 (boolean)\n");

		let res = &report.resolutions[0];
		assert_eq!(res.kind, Kind::Var);
		assert_eq!(res.ty.as_deref(), Some("boolean"));
	}

	#[test]
	fn reject_unknown() {
		let cfg = Config {
			unknown_names: UnknownNames::Reject,
			..Default::default()
		};

		let err = replay(SOURCE, &cfg).unwrap_err();
		assert!(matches!(err, Error::UnknownName(name) if name == "a"));
	}

	#[test]
	fn malformed() {
		let cases = [
			("static int x", 1),
			("class Main\nlocal int x", 2),
			("class Main\nfield int", 2),
			("class Main\nfield int x,", 2),
			("class Main\nsubroutine", 2),
			("class 1Main", 1),
			("class A\nclass A", 2),
		];

		for (source, expected) in cases {
			match replay(source, &Config::default()) {
				Err(Error::Script { line, .. }) => assert_eq!(line, expected, "{source}"),
				other => panic!("expected a script error for `{source}`, got: {other:?}"),
			}
		}
	}
}
