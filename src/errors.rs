use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ErrorKind {
	FailedToDeserialize(PathBuf),
	FailedToParse(String),
	FailedToRead(PathBuf),
	FailedToReadDirectory(PathBuf),
	FailedToRenderTemplate(String),
	FailedToSerialize(String),
	FailedToWatch(PathBuf),
	Message(String),
}

#[derive(Debug)]
pub struct Error {
	pub kind: ErrorKind,
	source: Option<Box<dyn StdError + Sync + Send>>,
}

impl Error {
	pub fn failed_to_deserialize(
		path: impl Into<PathBuf>,
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToDeserialize(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_parse(contents: impl ToString) -> Self {
		Self {
			kind: ErrorKind::FailedToParse(contents.to_string()),
			source: None,
		}
	}

	pub fn failed_to_read(path: impl Into<PathBuf>, source: ::std::io::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToRead(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_read_directory(
		path: impl Into<PathBuf>,
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToReadDirectory(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_render_template(name: &str, source: tera::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToRenderTemplate(name.to_string()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_serialize(
		format: impl ToString,
		source: impl Into<Box<dyn StdError + Send + Sync>>,
	) -> Self {
		Error {
			kind: ErrorKind::FailedToSerialize(format.to_string()),
			source: Some(source.into()),
		}
	}

	pub fn failed_to_watch(path: impl Into<PathBuf>, source: notify::Error) -> Self {
		Error {
			kind: ErrorKind::FailedToWatch(path.into()),
			source: Some(source.into()),
		}
	}

	pub fn message(text: impl ToString) -> Self {
		Self {
			kind: ErrorKind::Message(text.to_string()),
			source: None,
		}
	}

	/// Formats this error followed by its chain of sources.
	pub fn full_message(&self) -> String {
		let mut message = self.to_string();
		let mut source = self.source();
		while let Some(err) = source {
			message.push_str(&format!(" {}", err));
			source = err.source();
		}
		message
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.kind {
			ErrorKind::FailedToDeserialize(path) => {
				write!(f, "Failed to deserialize '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToParse(contents) => write!(f, "Failed to parse {}.", contents),
			ErrorKind::FailedToRead(path) => {
				write!(f, "Failed to read '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToReadDirectory(path) => {
				write!(f, "Failed to read directory '{}'.", path.to_string_lossy())
			}
			ErrorKind::FailedToRenderTemplate(name) => {
				write!(f, "Failed to render template '{}'.", name)
			}
			ErrorKind::FailedToSerialize(format) => write!(f, "Failed to serialize to {}.", format),
			ErrorKind::FailedToWatch(path) => {
				write!(f, "Failed to watch '{}'.", path.to_string_lossy())
			}
			ErrorKind::Message(message) => write!(f, "{}", message),
		}
	}
}

impl StdError for Error {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		self.source
			.as_ref()
			.map(|c| &**c as &(dyn StdError + 'static))
	}
}

pub type Result<T> = ::std::result::Result<T, Error>;
