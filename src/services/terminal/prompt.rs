// 標準入力からの1行プロンプト

use crate::core::Prompter;
use std::io::{self, BufRead, Write};

/// 標準入力を読む実装
#[derive(Debug, Default, Clone)]
pub struct StdinPrompter;

impl StdinPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for StdinPrompter {
    fn prompt(&self, field: &str) -> io::Result<Option<String>> {
        print!("{field}: ");
        io::stdout().flush()?;

        read_answer(&mut io::stdin().lock())
    }
}

/// 1行読んで末尾の改行を取り除く。EOF なら `None`
fn read_answer(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
}
