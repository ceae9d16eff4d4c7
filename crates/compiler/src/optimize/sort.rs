use defmask_primitives::{Line, LineFormat};

enum Bucket {
	Header,
	Pattern,
	Other,
}

fn bucket(line: &Line, format: &LineFormat) -> Bucket {
	match line {
		Line::Pattern(_) => Bucket::Pattern,
		Line::Raw(text) if text.starts_with('[') && text.ends_with(']') => Bucket::Header,
		Line::Raw(text) if format.is_pattern_text(text) => Bucket::Pattern,
		Line::Raw(_) => Bucket::Other,
	}
}

/// DEF code sort key; raw lines without a readable code sort last.
fn sort_key(line: &Line, format: &LineFormat) -> u32 {
	match line {
		Line::Pattern(line) => u32::from(line.code.value()),
		Line::Raw(text) => format.code_of(text).map_or(u32::MAX, |code| u32::from(code.value())),
	}
}

/// Orders lines as headers, pattern lines by DEF code, then everything else.
///
/// The sort is stable: lines with equal codes keep their relative order.
pub fn sort_lines(lines: Vec<Line>, format: &LineFormat) -> Vec<Line> {
	let mut headers = Vec::new();
	let mut patterns = Vec::new();
	let mut other = Vec::new();

	for line in lines {
		match bucket(&line, format) {
			Bucket::Header => headers.push(line),
			Bucket::Pattern => patterns.push(line),
			Bucket::Other => other.push(line),
		}
	}

	patterns.sort_by_key(|line| sort_key(line, format));

	headers.extend(patterns);
	headers.extend(other);
	headers
}
