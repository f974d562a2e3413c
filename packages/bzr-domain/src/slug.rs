pub const MAX_SLUG_CHARS: usize = 80;

/// Builds a URL slug from a title, transliterating Serbian Latin letters to ASCII.
pub fn slugify(title: &str) -> String {
	let mut out = String::with_capacity(title.len());
	let mut pending_dash = false;

	for ch in title.chars().flat_map(char::to_lowercase) {
		let ascii = match ch {
			'č' | 'ć' => "c",
			'š' => "s",
			'ž' => "z",
			'đ' => "dj",
			ch if ch.is_ascii_alphanumeric() => {
				push_segment(&mut out, &mut pending_dash, ch.encode_utf8(&mut [0; 4]));

				continue;
			},
			_ => {
				pending_dash = true;

				continue;
			},
		};

		push_segment(&mut out, &mut pending_dash, ascii);
	}

	if out.len() > MAX_SLUG_CHARS {
		out.truncate(MAX_SLUG_CHARS);

		while out.ends_with('-') {
			out.pop();
		}
	}

	out
}

fn push_segment(out: &mut String, pending_dash: &mut bool, segment: &str) {
	if *pending_dash && !out.is_empty() {
		out.push('-');
	}

	*pending_dash = false;

	out.push_str(segment);
}
