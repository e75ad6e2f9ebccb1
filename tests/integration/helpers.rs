//! Shared fixtures for integration tests.

/// A 128-byte SAUCE record for an 80-column ANSI file with iCE colors.
pub fn sauce_record(title: &str, author: &str, font: &str, comment_lines: u8) -> Vec<u8> {
    let mut rec = vec![b' '; 128];
    rec[0..7].copy_from_slice(b"SAUCE00");
    rec[7..7 + title.len()].copy_from_slice(title.as_bytes());
    rec[42..42 + author.len()].copy_from_slice(author.as_bytes());
    rec[82..90].copy_from_slice(b"19940315");
    rec[90..94].copy_from_slice(&4096u32.to_le_bytes());
    rec[94] = 1;
    rec[95] = 1;
    rec[96..98].copy_from_slice(&80u16.to_le_bytes());
    rec[98..100].copy_from_slice(&25u16.to_le_bytes());
    rec[100..104].fill(0);
    rec[104] = comment_lines;
    rec[105] = 0b0000_0001;
    rec[106..128].fill(0);
    rec[106..106 + font.len()].copy_from_slice(font.as_bytes());
    rec
}

/// Content, EOF marker, optional comment block and record.
pub fn with_sauce(content: &[u8], comments: &[&str], record: Vec<u8>) -> Vec<u8> {
    let mut buf = content.to_vec();
    buf.push(0x1A);
    if !comments.is_empty() {
        buf.extend_from_slice(b"COMNT");
        for line in comments {
            let mut padded = line.as_bytes().to_vec();
            padded.resize(64, b' ');
            buf.extend(padded);
        }
    }
    buf.extend(record);
    buf
}
