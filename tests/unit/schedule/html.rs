use super::*;

const PAGE: &str = r#"
<html><body>
  <div class="schedule__dayTitle">Saturday 25th Oct 2025 - Schedule Time UK GMT</div>
  <div class="schedule__category">
    <div class="schedule__catHeader"><div class="card__meta">Football</div></div>
    <div class="schedule__event">
      <span class="schedule__time">14:00</span>
      <span class="schedule__eventTitle">Arsenal   vs <b>Chelsea</b></span>
      <div class="schedule__channels"><a href="/1">Sky Sports 1</a><a href="/2">BBC One</a></div>
    </div>
    <div class="schedule__event">
      <span class="schedule__eventTitle">Missing time</span>
    </div>
  </div>
  <div class="schedule__category">
    <div class="card__meta">No header wrapper</div>
    <div class="schedule__event">
      <span class="schedule__time">10:00</span>
      <span class="schedule__eventTitle">Orphan</span>
    </div>
  </div>
</body></html>
"#;

#[test]
fn parses_header_categories_and_events() {
    let raw = HtmlSource::new().unwrap().parse_document(PAGE);
    assert_eq!(
        raw.date_header.as_deref(),
        Some("Saturday 25th Oct 2025 - Schedule Time UK GMT")
    );
    assert_eq!(raw.categories.len(), 2);

    let football = &raw.categories[0];
    assert_eq!(football.name, "Football");
    assert_eq!(football.events.len(), 2);
    assert_eq!(football.events[0].time.as_deref(), Some("14:00"));
    assert_eq!(
        football.events[0].title.as_deref(),
        Some("Arsenal vs Chelsea")
    );
    assert_eq!(
        football.events[0].channels.clone().into_names(),
        vec!["Sky Sports 1", "BBC One"]
    );
    assert_eq!(football.events[1].time, None);
}

#[test]
fn category_without_header_has_empty_name() {
    let raw = HtmlSource::new().unwrap().parse_document(PAGE);
    assert_eq!(raw.categories[1].name, "");
    assert_eq!(raw.categories[1].events.len(), 1);
}

#[test]
fn non_schedule_page_is_empty_not_an_error() {
    let src = HtmlSource::new().unwrap();
    let raw = src.parse(b"<html><body><p>maintenance</p></body></html>").unwrap();
    assert!(raw.categories.is_empty());
    assert!(raw.date_header.is_none());
}
