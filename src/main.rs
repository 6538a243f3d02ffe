use anyhow::Result;
use spanex::{
    AttributeType, FieldValue, Operator, RegexMatcher, RegexPredicate, Schema, Tuple,
    TupleSource,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("=== spanex: adaptive regex span matching demo ===");

    let schema = Schema::default()
        .with_attribute("id", AttributeType::Integer)
        .with_attribute("content", AttributeType::Text);

    let records = vec![
        make_record(1, "contact us at help-desk-42: code a42c applies"),
        make_record(2, "nothing interesting in this one"),
        make_record(3, "codes ac and a123c both appear here"),
        make_record(4, "trailing a9c"),
    ];

    let predicate = RegexPredicate::new("a[0-9]*c", vec!["content".to_string()])
        .with_span_list_attribute("spans");
    println!("regex: {}", predicate.regex);

    let mut matcher =
        RegexMatcher::new(predicate).with_input(Box::new(TupleSource::new(schema, records)));
    matcher.open()?;

    let mut emitted = 0;
    while let Some(tuple) = matcher.get_next()? {
        emitted += 1;
        let id = tuple.field("id");
        let spans = tuple
            .field("spans")
            .and_then(FieldValue::as_span_list)
            .unwrap_or(&[]);
        println!("\nrecord {:?}: {} span(s)", id, spans.len());
        for span in spans {
            println!("  {}", serde_json::to_string(span)?);
        }
    }
    matcher.close()?;

    println!("\n{emitted} of 4 records matched");
    Ok(())
}

fn make_record(id: i64, content: &str) -> Tuple {
    Tuple::new()
        .with_field("id", FieldValue::Integer(id))
        .with_field("content", FieldValue::Text(content.to_string()))
}
