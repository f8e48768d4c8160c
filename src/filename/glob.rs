// {{{ Copyright (c) Paul R. Tagliamonte <paultag@debian.org>, 2024
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE. }}}

//! Minimal shell-style glob matcher (`?`, `*`, `[a-z]`, with `?` also
//! serving as the escape metacharacter, matching the historical `wpkg`
//! convention of using `?` rather than `\` to escape a literal).

/// Return true if `pattern` matches `name` in full.
pub fn matches(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    match_here(&p, &n)
}

fn match_here(p: &[char], n: &[char]) -> bool {
    if p.is_empty() {
        return n.is_empty();
    }
    match p[0] {
        '*' => {
            for i in 0..=n.len() {
                if match_here(&p[1..], &n[i..]) {
                    return true;
                }
            }
            false
        }
        '?' if p.len() > 1 && p[1] != '*' && !matches!(p[1], '[') => {
            // escape: `?x` matches a literal `x`
            !n.is_empty() && n[0] == p[1] && match_here(&p[2..], &n[1..])
        }
        '?' => !n.is_empty() && match_here(&p[1..], &n[1..]),
        '[' => {
            let Some(close) = p.iter().position(|&c| c == ']') else {
                return !n.is_empty() && n[0] == '[' && match_here(&p[1..], &n[1..]);
            };
            if n.is_empty() {
                return false;
            }
            if class_matches(&p[1..close], n[0]) {
                match_here(&p[close + 1..], &n[1..])
            } else {
                false
            }
        }
        c => !n.is_empty() && n[0] == c && match_here(&p[1..], &n[1..]),
    }
}

fn class_matches(class: &[char], c: char) -> bool {
    let mut i = 0;
    while i < class.len() {
        if i + 2 < class.len() && class[i + 1] == '-' {
            if class[i] <= c && c <= class[i + 2] {
                return true;
            }
            i += 3;
        } else {
            if class[i] == c {
                return true;
            }
            i += 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::matches;

    #[test]
    fn star_matches_anything() {
        assert!(matches("*.tar.gz", "foo.tar.gz"));
        assert!(!matches("*.tar.gz", "foo.tar.bz2"));
    }

    #[test]
    fn question_mark_matches_one_char() {
        assert!(matches("foo.?", "foo.c"));
        assert!(!matches("foo.?", "foo.cc"));
    }

    #[test]
    fn character_class_matches_range() {
        assert!(matches("foo[0-9].c", "foo1.c"));
        assert!(!matches("foo[0-9].c", "fooa.c"));
    }
}

// vim: foldmethod=marker
