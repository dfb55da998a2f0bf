use nutriprep::{clean, read_csv, Cell, ColumnSchema, PrepError, RawTable};

fn schema() -> ColumnSchema {
    ColumnSchema {
        identifier: "gtin".to_string(),
        text: vec!["product_name".to_string(), "ingredients_text".to_string()],
        nutrient: vec!["calories".to_string(), "protein".to_string()],
        tag: vec!["is_starch".to_string()],
        flag: vec!["flag_type_error".to_string()],
        required_text: Some("ingredients_text".to_string()),
    }
}

fn raw_table(rows: &[&[Option<&str>]]) -> RawTable {
    let mut table = RawTable::new(
        [
            "gtin",
            "product_name",
            "ingredients_text",
            "calories",
            "protein",
            "is_starch",
            "flag_type_error",
        ]
        .iter()
        .map(|name| name.to_string())
        .collect(),
    );
    for row in rows {
        table.push_row(row.iter().map(|cell| cell.map(str::to_string)).collect());
    }
    table
}

fn number(table: &nutriprep::Table, row: usize, column: &str) -> f64 {
    table
        .cell(row, column)
        .and_then(Cell::as_number)
        .unwrap_or_else(|| panic!("expected number at row {row} column {column}"))
}

#[test]
fn marked_cells_clean_and_set_the_label() {
    // Scenario: gtin "123", ingredients "milk^", calories "50^".
    let outcome = clean(
        raw_table(&[&[
            Some("123"),
            Some("Oat Drink"),
            Some("milk^"),
            Some("50^"),
            Some("3"),
            Some("TRUE"),
            Some("false"),
        ]]),
        &schema(),
    )
    .unwrap();

    assert_eq!(outcome.counters.retained, 1);
    assert_eq!(number(&outcome.table, 0, "calories"), 50.0);
    assert_eq!(number(&outcome.table, 0, "protein"), 3.0);
    assert_eq!(number(&outcome.table, 0, "label_is_anomaly"), 1.0);
    assert_eq!(
        outcome.table.cell(0, "ingredients_text"),
        Some(&Cell::Text("milk".into()))
    );
    assert_eq!(outcome.table.cell(0, "is_starch"), Some(&Cell::Bool(true)));
    assert_eq!(
        outcome.table.cell(0, "flag_type_error"),
        Some(&Cell::Bool(false))
    );
}

#[test]
fn duplicate_identifiers_keep_the_first_sorted_occurrence() {
    // Scenario: two rows for gtin "5"; the kept row resolves its own parse.
    let outcome = clean(
        raw_table(&[
            &[Some("5"), None, Some("milk"), Some("abc"), None, None, None],
            &[Some("5"), None, Some("milk"), Some("10"), None, None, None],
        ]),
        &schema(),
    )
    .unwrap();

    assert_eq!(outcome.counters.removed_duplicates, 1);
    assert_eq!(outcome.counters.retained, 1);
    // The kept row is the "abc" one, so calories resolves to the sentinel.
    assert_eq!(number(&outcome.table, 0, "calories"), -1.0);
}

#[test]
fn missing_identifier_rows_are_counted() {
    let outcome = clean(
        raw_table(&[
            &[None, None, Some("milk"), Some("1"), None, None, None],
            &[Some("9"), None, Some("soy"), Some("2"), None, None, None],
        ]),
        &schema(),
    )
    .unwrap();
    assert_eq!(outcome.counters.removed_no_identifier, 1);
    assert_eq!(outcome.counters.retained, 1);
}

#[test]
fn blank_required_text_rows_are_counted() {
    let outcome = clean(
        raw_table(&[
            &[Some("1"), None, Some("   "), Some("1"), None, None, None],
            &[Some("2"), None, Some("soy"), Some("2"), None, None, None],
        ]),
        &schema(),
    )
    .unwrap();
    assert_eq!(outcome.counters.removed_empty_text, 1);
    assert_eq!(outcome.counters.retained, 1);
}

#[test]
fn output_identifiers_are_unique_and_sorted() {
    let outcome = clean(
        raw_table(&[
            &[Some("30"), None, Some("c"), None, None, None, None],
            &[Some("10"), None, Some("a"), None, None, None, None],
            &[Some("20"), None, Some("b"), None, None, None, None],
            &[Some("10"), None, Some("later dup"), None, None, None, None],
        ]),
        &schema(),
    )
    .unwrap();

    let ids: Vec<&str> = (0..outcome.table.row_count())
        .map(|row| {
            outcome
                .table
                .cell(row, "gtin")
                .and_then(Cell::as_str)
                .unwrap()
        })
        .collect();
    assert_eq!(ids, ["10", "20", "30"]);
    assert_eq!(
        outcome.table.cell(0, "ingredients_text"),
        Some(&Cell::Text("a".into()))
    );
}

#[test]
fn nutrient_cells_are_never_nan_or_missing() {
    let outcome = clean(
        raw_table(&[
            &[Some("1"), None, Some("a"), Some("NaN"), Some("x"), None, None],
            &[Some("2"), None, Some("b"), None, Some("2.5^"), None, None],
        ]),
        &schema(),
    )
    .unwrap();

    for row in 0..outcome.table.row_count() {
        for column in ["calories", "protein"] {
            let value = number(&outcome.table, row, column);
            assert!(!value.is_nan());
        }
    }
    assert_eq!(number(&outcome.table, 0, "calories"), -1.0);
    assert_eq!(number(&outcome.table, 1, "protein"), 2.5);
}

#[test]
fn booleans_fail_open_to_false() {
    for junk in ["yes", "no", "2", "TRUE^", " true", "maybe", "✓"] {
        let outcome = clean(
            raw_table(&[&[
                Some("1"),
                None,
                Some("milk"),
                None,
                None,
                Some(junk),
                Some(junk),
            ]]),
            &schema(),
        )
        .unwrap();
        assert_eq!(
            outcome.table.cell(0, "is_starch"),
            Some(&Cell::Bool(false)),
            "tag input {junk:?} must fail open"
        );
        assert_eq!(
            outcome.table.cell(0, "flag_type_error"),
            Some(&Cell::Bool(false)),
            "flag input {junk:?} must fail open"
        );
    }
}

#[test]
fn clean_is_idempotent_over_rendered_output() {
    let first = clean(
        raw_table(&[
            &[
                Some("123"),
                Some("Oat Drink^"),
                Some("milk^"),
                Some("50^"),
                Some("junk"),
                Some("1"),
                Some("0"),
            ],
            &[Some("5"), None, Some("soy"), Some("abc"), None, None, None],
            &[Some("5"), None, Some("soy"), Some("10"), None, None, None],
            &[None, None, Some("rye"), Some("1"), None, None, None],
            &[Some("7"), None, Some("  "), Some("1"), None, None, None],
        ]),
        &schema(),
    )
    .unwrap();

    let second = clean(first.table.to_raw(), &schema()).unwrap();
    assert_eq!(second.table, first.table);
    assert_eq!(second.counters.initial, first.counters.retained);
    assert_eq!(second.counters.removed_no_identifier, 0);
    assert_eq!(second.counters.removed_empty_text, 0);
    assert_eq!(second.counters.removed_duplicates, 0);
    assert_eq!(second.counters.total_removed, 0);
}

#[test]
fn identifier_column_must_exist_for_nonempty_inputs() {
    let data = "calories,ingredients_text\n5,milk\n";
    let raw = read_csv(data.as_bytes()).unwrap();
    let err = clean(raw, &schema()).unwrap_err();
    assert!(matches!(err, PrepError::SchemaViolation { column } if column == "gtin"));
}

#[test]
fn canonical_schema_cleans_a_csv_end_to_end() {
    let data = "\
gtin,category_name,product_name,ingredients_text,calories,total_sugars,is_corn_syrup,flag_high_sodium,extra
2,Snacks,Bar Two,\"oats, honey^\",210,12^,TRUE,0,drop-me
1,Drinks,Drink One,water,0,,false,1,drop-me
";
    let raw = read_csv(data.as_bytes()).unwrap();
    let schema = ColumnSchema::product_nutrition();
    let outcome = clean(raw, &schema).unwrap();

    let names: Vec<&str> = outcome.table.column_names().collect();
    assert_eq!(
        names,
        [
            "gtin",
            "category_name",
            "product_name",
            "ingredients_text",
            "calories",
            "total_sugars",
            "is_corn_syrup",
            "flag_high_sodium",
            "label_is_anomaly"
        ]
    );
    assert_eq!(outcome.counters.retained, 2);
    // Sorted by gtin ascending.
    assert_eq!(outcome.table.cell(0, "gtin"), Some(&Cell::Text("1".into())));
    assert_eq!(number(&outcome.table, 0, "label_is_anomaly"), 0.0);
    assert_eq!(number(&outcome.table, 0, "total_sugars"), -1.0);
    assert_eq!(number(&outcome.table, 1, "label_is_anomaly"), 1.0);
    assert_eq!(number(&outcome.table, 1, "total_sugars"), 12.0);
    assert_eq!(
        outcome.table.cell(1, "ingredients_text"),
        Some(&Cell::Text("oats, honey".into()))
    );
}
