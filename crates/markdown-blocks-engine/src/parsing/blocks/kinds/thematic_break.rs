/// Horizontal rule: three or more of one rule character, spaces allowed between.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const CHARS: [char; 3] = ['-', '*', '_'];
    pub const MIN_LEN: usize = 3;

    pub fn matches(line: &str) -> bool {
        let Some(t) = super::strip_indent(line) else {
            return false;
        };
        let mut marks = t.chars().filter(|c| !c.is_whitespace());
        let Some(first) = marks.next() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 1;
        for c in marks {
            if c != first {
                return false;
            }
            count += 1;
        }
        count >= Self::MIN_LEN
    }
}
