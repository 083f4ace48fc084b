//! [`Kind`], the storage category of a declared identifier.

use std::str::FromStr;

use crate::Error;

/// The closed set of categories an identifier can be declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Static,
	Field,
	Arg,
	Var,
}

/// Which of the table's two nested scopes owns a [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeLevel {
	/// Lives as long as the compiled class.
	Class,
	/// Reset at the start of every subroutine.
	Subroutine,
}

/// A virtual machine memory segment that code generation addresses variables through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
	Static,
	This,
	Argument,
	Local,
}

impl Kind {
	pub const ALL: [Self; 4] = [Self::Static, Self::Field, Self::Arg, Self::Var];

	#[must_use]
	pub fn level(self) -> ScopeLevel {
		match self {
			Self::Static | Self::Field => ScopeLevel::Class,
			Self::Arg | Self::Var => ScopeLevel::Subroutine,
		}
	}

	#[must_use]
	pub fn segment(self) -> Segment {
		match self {
			Self::Static => Segment::Static,
			Self::Field => Segment::This,
			Self::Arg => Segment::Argument,
			Self::Var => Segment::Local,
		}
	}

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Static => "STATIC",
			Self::Field => "FIELD",
			Self::Arg => "ARG",
			Self::Var => "VAR",
		}
	}
}

impl FromStr for Kind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnknownKind(s.to_string()))
	}
}

impl std::fmt::Display for Kind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Segment {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Static => "static",
			Self::This => "this",
			Self::Argument => "argument",
			Self::Local => "local",
		}
	}
}

impl std::fmt::Display for Segment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
