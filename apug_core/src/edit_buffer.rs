/// A pending replacement of the snapshot bytes `[from, to)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
	/// Start offset in the snapshot the edit was recorded against.
	pub from: usize,
	/// End offset (exclusive) in the same snapshot.
	pub to: usize,
	/// Text that takes the place of the replaced bytes.
	pub replacement: String,
}

impl Edit {
	pub fn new(from: usize, to: usize, replacement: impl Into<String>) -> Self {
		Self {
			from,
			to,
			replacement: replacement.into(),
		}
	}

	pub fn insert(at: usize, text: impl Into<String>) -> Self {
		Self::new(at, at, text)
	}

	pub fn delete(from: usize, to: usize) -> Self {
		Self::new(from, to, "")
	}
}

/// Collects edits against an immutable snapshot and applies them in one go.
///
/// Every edit is expressed in offsets of the snapshot, never of a partially
/// rewritten string. Edits are applied from the highest `from` downwards so
/// that a replacement never shifts the offsets of an edit still to come.
/// Overlapping edits are not supported.
///
/// [`EditBuffer::get`] peeks at the result, while [`EditBuffer::apply`]
/// commits it as the new snapshot so that another layer of edits can be
/// recorded against the rewritten text.
///
/// ```rust
/// use apug_core::EditBuffer;
///
/// let mut buffer = EditBuffer::new("abcdef");
/// buffer.add(2, 4, "X");
/// buffer.add(0, 2, "Y");
/// assert_eq!(buffer.get(), "YXef");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
	snapshot: String,
	edits: Vec<Edit>,
}

impl EditBuffer {
	pub fn new(snapshot: impl Into<String>) -> Self {
		Self {
			snapshot: snapshot.into(),
			edits: Vec::new(),
		}
	}

	/// The text all pending edits refer to.
	pub fn snapshot(&self) -> &str {
		&self.snapshot
	}

	/// Number of edits recorded since the last [`EditBuffer::apply`].
	pub fn pending(&self) -> usize {
		self.edits.len()
	}

	pub fn add(&mut self, from: usize, to: usize, replacement: impl Into<String>) {
		self.push(Edit::new(from, to, replacement));
	}

	pub fn push(&mut self, edit: Edit) {
		debug_assert!(
			edit.from <= edit.to && edit.to <= self.snapshot.len(),
			"edit {}..{} out of bounds for snapshot of length {}",
			edit.from,
			edit.to,
			self.snapshot.len()
		);
		self.edits.push(edit);
	}

	/// The snapshot with every pending edit applied. The buffer is left as
	/// is.
	pub fn get(&self) -> String {
		let mut ordered: Vec<&Edit> = self.edits.iter().collect();
		ordered.sort_by(|a, b| b.from.cmp(&a.from));

		let mut output = self.snapshot.clone();
		for edit in ordered {
			output.replace_range(edit.from..edit.to, &edit.replacement);
		}

		output
	}

	/// Apply every pending edit, make the result the new snapshot and clear
	/// the pending edits.
	pub fn apply(&mut self) -> &str {
		if !self.edits.is_empty() {
			self.snapshot = self.get();
			self.edits.clear();
		}

		&self.snapshot
	}

	/// Consume the buffer, returning the rewritten text.
	pub fn into_string(mut self) -> String {
		self.apply();
		self.snapshot
	}
}

impl Extend<Edit> for EditBuffer {
	fn extend<T: IntoIterator<Item = Edit>>(&mut self, iter: T) {
		for edit in iter {
			self.push(edit);
		}
	}
}
