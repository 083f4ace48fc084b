//! [`SymbolTable`] and [`Entry`].
//!
//! The table has two nested scopes. The class scope holds [`Kind::Static`] and
//! [`Kind::Field`] entries for the whole compiled class; the subroutine scope
//! holds [`Kind::Arg`] and [`Kind::Var`] entries and is discarded every time
//! [`SymbolTable::start_subroutine`] is called.
//!
//! Every entry's index is its ordinal position among entries of the same kind,
//! in definition order, starting from zero. Indices are never reused until the
//! owning scope is reset.

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::{Kind, ScopeLevel, Segment};

/// Subroutine scope first, so locals shadow class members.
const RESOLVE_ORDER: [Kind; 4] = [Kind::Arg, Kind::Var, Kind::Static, Kind::Field];
/// Class scope first. Differs from [`RESOLVE_ORDER`]; see [`SymbolTable::type_of`].
const TYPE_ORDER: [Kind; 4] = [Kind::Static, Kind::Field, Kind::Arg, Kind::Var];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
	name: Box<str>,
	ty: Box<str>,
	kind: Kind,
	index: u32,
}

impl Entry {
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// A built-in type name or a class name. Never interpreted by the table.
	#[must_use]
	pub fn ty(&self) -> &str {
		&self.ty
	}

	#[must_use]
	pub fn kind(&self) -> Kind {
		self.kind
	}

	#[must_use]
	pub fn index(&self) -> u32 {
		self.index
	}

	#[must_use]
	pub fn storage(&self) -> Storage {
		Storage {
			segment: self.kind.segment(),
			index: self.index,
		}
	}
}

impl std::fmt::Display for Entry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {} {}: {}", self.kind, self.index, self.name, self.ty)
	}
}

/// A segment-plus-offset pair, e.g. `local 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Storage {
	pub segment: Segment,
	pub index: u32,
}

impl std::fmt::Display for Storage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.segment, self.index)
	}
}

/// The ordered entries of one [`Kind`].
#[derive(Debug, Default)]
struct Category {
	entries: Vec<Entry>,
	/// Maps each name to the position of its *first* definition,
	/// which is what a front-to-back scan over `entries` would find.
	first: FxHashMap<Box<str>, usize>,
}

impl Category {
	fn push(&mut self, name: &str, ty: &str, kind: Kind) -> u32 {
		let pos = self.entries.len();
		let index = index_for(pos);

		if self.first.contains_key(name) {
			debug!("`{name}` redefined as {kind} {index}; lookups keep resolving the first definition.");
		} else {
			self.first.insert(name.into(), pos);
		}

		self.entries.push(Entry {
			name: name.into(),
			ty: ty.into(),
			kind,
			index,
		});

		index
	}

	#[must_use]
	fn get(&self, name: &str) -> Option<&Entry> {
		self.first.get(name).map(|&pos| &self.entries[pos])
	}

	#[must_use]
	fn len(&self) -> u32 {
		// `index_for` keeps every category below `u32::MAX` entries.
		u32::try_from(self.entries.len()).unwrap_or(u32::MAX)
	}
}

/// Converts the position of a new entry into its index.
///
/// # Panics
///
/// If the category already holds `u32::MAX` entries, like `Vec` does on capacity overflow.
#[must_use]
fn index_for(pos: usize) -> u32 {
	match u32::try_from(pos) {
		Ok(index) if index < u32::MAX => index,
		_ => panic!("symbol category overflow: more than {} entries", u32::MAX),
	}
}

#[derive(Debug, Default)]
struct ClassScope {
	statics: Category,
	fields: Category,
}

#[derive(Debug, Default)]
struct SubroutineScope {
	args: Category,
	vars: Category,
}

/// One table per compiled class. Not meant to be shared between compilations.
#[derive(Debug, Default)]
pub struct SymbolTable {
	class: ClassScope,
	/// `None` until the first call to [`SymbolTable::start_subroutine`].
	subroutine: Option<SubroutineScope>,
}

impl SymbolTable {
	/// Creates a table with an empty class scope and no subroutine scope.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Discards every [`Kind::Arg`] and [`Kind::Var`] entry and opens an empty
	/// subroutine scope. Class-scope entries are untouched.
	pub fn start_subroutine(&mut self) {
		if let Some(prev) = self.subroutine.as_ref() {
			debug!(
				"Discarding subroutine scope ({} args, {} vars).",
				prev.args.len(),
				prev.vars.len()
			);
		}

		self.subroutine = Some(SubroutineScope::default());
	}

	/// Appends a new entry under `kind` and returns the index assigned to it.
	///
	/// Duplicate names are accepted; the earlier definition keeps shadowing the
	/// later one for every lookup. Rejecting redeclarations is up to the caller.
	///
	/// Defining a subroutine-scope kind before [`Self::start_subroutine`] has
	/// ever been called opens the subroutine scope implicitly.
	///
	/// # Panics
	///
	/// If `kind` already holds `u32::MAX` entries.
	pub fn define(&mut self, name: &str, ty: &str, kind: Kind) -> u32 {
		let index = self.category_mut(kind).push(name, ty, kind);
		trace!("Defined `{name}` as {kind} {index} of type `{ty}`.");
		index
	}

	/// The number of entries defined under `kind` in its owning scope.
	#[must_use]
	pub fn var_count(&self, kind: Kind) -> u32 {
		self.category(kind).map_or(0, Category::len)
	}

	/// Resolves `name` to its kind, with subroutine-scope entries shadowing
	/// class-scope entries (`ARG`, then `VAR`, then `STATIC`, then `FIELD`).
	///
	/// # Unknown names
	///
	/// A name that is not defined anywhere resolves to [`Kind::Field`], which is
	/// indistinguishable from a real field. Only call this with names the front
	/// end has already checked; use [`Self::resolve`] to tell the cases apart.
	#[must_use]
	pub fn kind_of(&self, name: &str) -> Kind {
		self.resolve(name).map_or(Kind::Field, Entry::kind)
	}

	/// The declared type of `name`, or `None` if it is not defined anywhere.
	///
	/// Unlike [`Self::kind_of`] and [`Self::index_of`], this checks the class
	/// scope first (`STATIC`, `FIELD`, `ARG`, `VAR`). When a local shadows a
	/// class member of the same name, the class member's type is returned.
	#[must_use]
	pub fn type_of(&self, name: &str) -> Option<&str> {
		self.lookup(TYPE_ORDER, name).map(Entry::ty)
	}

	/// The index of `name`, using the same priority as [`Self::kind_of`].
	#[must_use]
	pub fn index_of(&self, name: &str) -> Option<u32> {
		self.resolve(name).map(Entry::index)
	}

	/// The entry `name` refers to in the current scope, if any.
	#[must_use]
	pub fn resolve(&self, name: &str) -> Option<&Entry> {
		self.lookup(RESOLVE_ORDER, name)
	}

	/// Where code generation should read or write `name`.
	#[must_use]
	pub fn storage_of(&self, name: &str) -> Option<Storage> {
		self.resolve(name).map(Entry::storage)
	}

	/// Every entry of `kind`, in definition (and therefore index) order.
	#[must_use]
	pub fn entries(&self, kind: Kind) -> &[Entry] {
		match self.category(kind) {
			Some(cat) => &cat.entries,
			None => &[],
		}
	}

	#[must_use]
	pub fn has_subroutine_scope(&self) -> bool {
		self.subroutine.is_some()
	}

	#[must_use]
	fn lookup(&self, order: [Kind; 4], name: &str) -> Option<&Entry> {
		order
			.into_iter()
			.find_map(|kind| self.category(kind)?.get(name))
	}

	#[must_use]
	fn category(&self, kind: Kind) -> Option<&Category> {
		match kind {
			Kind::Static => Some(&self.class.statics),
			Kind::Field => Some(&self.class.fields),
			Kind::Arg => self.subroutine.as_ref().map(|sub| &sub.args),
			Kind::Var => self.subroutine.as_ref().map(|sub| &sub.vars),
		}
	}

	fn category_mut(&mut self, kind: Kind) -> &mut Category {
		if kind.level() == ScopeLevel::Subroutine && self.subroutine.is_none() {
			warn!("{kind} defined outside of any subroutine; opening a subroutine scope.");
		}

		match kind {
			Kind::Static => &mut self.class.statics,
			Kind::Field => &mut self.class.fields,
			Kind::Arg => &mut self.subroutine.get_or_insert_with(Default::default).args,
			Kind::Var => &mut self.subroutine.get_or_insert_with(Default::default).vars,
		}
	}
}

impl std::fmt::Display for SymbolTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "class scope:")?;

		for entry in self.entries(Kind::Static).iter().chain(self.entries(Kind::Field)) {
			writeln!(f, "    {entry}")?;
		}

		if self.subroutine.is_none() {
			return writeln!(f, "subroutine scope: (none)");
		}

		writeln!(f, "subroutine scope:")?;

		for entry in self.entries(Kind::Arg).iter().chain(self.entries(Kind::Var)) {
			writeln!(f, "    {entry}")?;
		}

		Ok(())
	}
}
