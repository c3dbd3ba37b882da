//! 按通用换行规则（`\n`、`\r\n`、单独的 `\r`）切分字节流。

use std::borrow::Cow;
use std::io::{self, BufRead};

/// 逐行回调，行内容按 UTF-8 解码，非法字节被丢弃，不会导致失败。
pub(crate) fn for_each_line<R, F>(mut reader: R, mut on_line: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(Cow<'_, str>),
{
    let mut current = Vec::new();
    let mut pending_cr = false;

    loop {
        let consumed = {
            let buf = reader.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            for &byte in buf {
                if pending_cr && byte == b'\n' {
                    pending_cr = false;
                    continue;
                }
                pending_cr = false;
                match byte {
                    b'\n' | b'\r' => {
                        on_line(decode_ignoring_invalid(&current));
                        current.clear();
                        pending_cr = byte == b'\r';
                    }
                    _ => current.push(byte),
                }
            }
            buf.len()
        };
        reader.consume(consumed);
    }

    if !current.is_empty() {
        on_line(decode_ignoring_invalid(&current));
    }
    Ok(())
}

/// 解码 UTF-8，跳过非法字节序列而不是替换为 U+FFFD。
fn decode_ignoring_invalid(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    Cow::Owned(text)
}
