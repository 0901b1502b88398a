use audiora_export::docx::{generate_docx, table_cells};
use audiora_export::styles::DocumentStyles;

#[test]
fn output_is_a_zip_package() {
    let rendered = "# Report\n**Name:** Test\n- item\n| Hz | Right |\n|---|---|\n| 500 | 20 |\n---\nEnd";
    let bytes = generate_docx(rendered, &DocumentStyles::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn header_text_and_trailing_table_are_accepted() {
    let styles = DocumentStyles {
        header_text: Some("City Hearing Centre".to_string()),
        ..DocumentStyles::default()
    };
    let bytes = generate_docx("| A | B |\n| 1 | 2 |", &styles).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn table_cells_are_trimmed_and_keep_blanks() {
    assert_eq!(table_cells("| 500 | 30 |  | 5 |  |"), vec!["500", "30", "", "5", ""]);
}

#[test]
fn margin_converts_to_twips() {
    let styles = DocumentStyles {
        margin_inches: 1.0,
        ..DocumentStyles::default()
    };
    assert_eq!(styles.margin_twips(), 1440);
}
