use crate::ErrorBox;

#[derive(Debug)]
pub enum Error {
	/// A category string other than `STATIC`, `FIELD`, `ARG`, or `VAR`.
	UnknownKind(String),
	/// Only raised when the caller opts out of aliasing unknown names to fields.
	UnknownName(String),
	/// A malformed line in a declaration trace. Lines are 1-based.
	Script { line: usize, ctx: String },
	Process {
		source: Option<ErrorBox>,
		ctx: String,
	},
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Process {
				source: Some(s), ..
			} => Some(s.as_ref()),
			_ => None,
		}
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownKind(kind) => write!(f, "unknown symbol kind: `{kind}`"),
			Self::UnknownName(name) => write!(f, "name is not defined in any scope: `{name}`"),
			Self::Script { line, ctx } => write!(f, "line {line}: {ctx}"),
			Self::Process { source, ctx } => match source {
				Some(s) => {
					write!(f, "{ctx}: {s}")
				}
				None => {
					write!(f, "{ctx}")
				}
			},
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(value: std::io::Error) -> Self {
		Self::Process {
			source: Some(Box::new(value)),
			ctx: "file I/O failure".to_string(),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(value: serde_json::Error) -> Self {
		Self::Process {
			source: Some(Box::new(value)),
			ctx: "malformed configuration".to_string(),
		}
	}
}
