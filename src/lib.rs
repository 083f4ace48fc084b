//! # Jack Symbol Table
//!
//! The two-level scoped symbol table consulted while compiling one Jack class:
//! semantic analysis declares identifiers into it, and code generation asks it
//! to translate bare names into typed, indexed storage references.

pub mod config;
pub mod error;
pub mod kind;
pub mod replay;
pub mod setup;
pub mod symtab;

#[cfg(test)]
mod test;

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

pub use self::{
	config::{Config, UnknownNames},
	error::Error,
	kind::{Kind, ScopeLevel, Segment},
	symtab::{Entry, Storage, SymbolTable},
};

pub type ErrorBox = Box<dyn std::error::Error + Send + Sync>;
pub type UnitResult = Result<(), Error>;
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
