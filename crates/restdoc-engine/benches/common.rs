// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_rst_content(size: usize) -> String {
    let base = "Title\n=====\n\nSection\n-------\n\nParagraph with *some* content and a link_.\n\n- Bullet point\n- Another item\n\nExample::\n\n    fn example() {\n        println!(\"Hello\");\n    }\n\n.. note:: Remember this.\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_sections(sections: usize, depth: usize) -> String {
    const UNDERLINES: [char; 6] = ['=', '-', '~', '^', '"', '+'];

    let mut content = String::new();
    for section in 0..sections {
        for level in 0..depth.min(UNDERLINES.len()) {
            let title = format!("Section {section} level {level}");
            let underline = UNDERLINES[level].to_string().repeat(title.len());
            content.push_str(&format!("{title}\n{underline}\n\n"));
            content.push_str("Some paragraph content with multiple sentences. This helps create realistic document structure for benchmarking.\n\n");
        }
    }
    content
}

#[allow(dead_code)]
pub fn generate_simple_table(rows: usize) -> String {
    let mut content = String::from("=====  ==========\nKey    Value\n=====  ==========\n");
    for row in 0..rows {
        content.push_str(&format!("k{row:<4}  value {row}\n"));
    }
    content.push_str("=====  ==========\n");
    content
}
