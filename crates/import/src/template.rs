//! The starter CSV offered next to the import dialog, in the exact
//! schema the CSV parser expects.

const TEMPLATE_HEADER: [&str; 4] = ["Amount", "Category", "Date", "Description"];

const TEMPLATE_ROWS: [[&str; 4]; 5] = [
    ["1000", "Food", "2024-01-15", "Groceries"],
    ["500", "Transport", "2024-01-16", "Fuel"],
    ["2000", "Entertainment", "2024-01-17", "Movie tickets"],
    ["3000", "Rent", "2024-01-18", "Monthly rent"],
    ["800", "Utilities", "2024-01-19", "Electricity bill"],
];

/// Render the template document.
pub fn template_csv() -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(TEMPLATE_HEADER)
        .expect("in-memory write cannot fail");
    for row in TEMPLATE_ROWS {
        writer.write_record(row).expect("in-memory write cannot fail");
    }
    let bytes = writer.into_inner().expect("in-memory write cannot fail");
    String::from_utf8(bytes).expect("template is ASCII")
}
