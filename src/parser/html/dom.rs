use log::debug;
use scraper::{ElementRef, Html, Selector};
use serde_json::{json, Map, Value};

use super::selector;
use crate::ScraperResult;

/// CSS selectors for the DOM fallback. Class names on these sites are
/// hashed per build, so the defaults match on stable substrings only.
#[derive(Debug, Clone)]
pub struct DomSelectors {
    pub section: String,
    pub section_title: String,
    pub card: String,
    pub team_name: String,
    pub score: String,
    pub info_message: String,
    pub time: String,
    pub image: String,
}

impl Default for DomSelectors {
    fn default() -> Self {
        Self {
            section: r#"div[class*="matchCardsList"]"#.to_string(),
            section_title: r#"h2[class*="Title"]"#.to_string(),
            card: r#"a[class*="MatchCard"], a[href*="/pertandingan/"], a[href*="/match/"]"#
                .to_string(),
            team_name: r#"span[class*="__name__"]"#.to_string(),
            score: r#"span[class*="__score__"]"#.to_string(),
            info_message: r#"span[class*="__infoMessage__"]"#.to_string(),
            time: "time".to_string(),
            image: "img".to_string(),
        }
    }
}

struct Compiled {
    section: Selector,
    section_title: Selector,
    card: Selector,
    team_name: Selector,
    score: Selector,
    info_message: Selector,
    time: Selector,
    image: Selector,
    span: Selector,
}

impl Compiled {
    fn new(selectors: &DomSelectors) -> ScraperResult<Self> {
        Ok(Self {
            section: selector(&selectors.section)?,
            section_title: selector(&selectors.section_title)?,
            card: selector(&selectors.card)?,
            team_name: selector(&selectors.team_name)?,
            score: selector(&selectors.score)?,
            info_message: selector(&selectors.info_message)?,
            time: selector(&selectors.time)?,
            image: selector(&selectors.image)?,
            span: selector("span")?,
        })
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .map(text_of)
        .find(|text| !text.is_empty())
}

fn image_src(element: ElementRef<'_>) -> Option<String> {
    ["src", "data-src", "srcset"]
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .map(|src| src.split_whitespace().next().unwrap_or_default().to_string())
        .find(|src| !src.is_empty() && !src.starts_with("data:"))
}

/// Team names from the dedicated name selector, or, when the markup no
/// longer carries it, the first two span texts that look like names.
fn team_names(card: ElementRef<'_>, compiled: &Compiled) -> Vec<String> {
    let names: Vec<String> = card
        .select(&compiled.team_name)
        .map(text_of)
        .filter(|text| !text.is_empty())
        .collect();
    if names.len() >= 2 {
        return names;
    }

    card.select(&compiled.span)
        .map(text_of)
        .filter(|text| {
            text.chars().count() > 2 && !text.contains(':') && text.parse::<f64>().is_err()
        })
        .collect()
}

fn team(name: Option<&String>, logo: Option<String>) -> Value {
    let mut team = Map::new();
    if let Some(name) = name {
        team.insert("name".into(), Value::String(name.clone()));
    }
    if let Some(logo) = logo {
        team.insert("logo".into(), Value::String(logo));
    }
    Value::Object(team)
}

fn card_record(card: ElementRef<'_>, compiled: &Compiled) -> Value {
    let names = team_names(card, compiled);
    let images: Vec<String> = card.select(&compiled.image).filter_map(image_src).collect();
    let scores: Vec<String> = card
        .select(&compiled.score)
        .map(text_of)
        .filter(|text| !text.is_empty())
        .collect();

    let kickoff = card.select(&compiled.time).next().and_then(|time| {
        time.value()
            .attr("datetime")
            .map(str::to_string)
            .or_else(|| Some(text_of(time)).filter(|text| !text.is_empty()))
    });

    let link = card.value().attr("href").map(str::to_string).or_else(|| {
        card.select(&compiled.card)
            .find_map(|inner| inner.value().attr("href").map(str::to_string))
    });

    let mut record = Map::new();
    record.insert(
        "homeTeam".into(),
        team(names.first(), images.first().cloned()),
    );
    // First and last, so stray labels between the two teams are ignored.
    record.insert(
        "awayTeam".into(),
        team(
            names.last().filter(|_| names.len() >= 2),
            images.last().filter(|_| images.len() >= 2).cloned(),
        ),
    );
    if let Some(kickoff) = kickoff {
        record.insert("kickoff".into(), Value::String(kickoff));
    }
    if let Some(status) = first_text(card, &compiled.info_message) {
        record.insert("status".into(), Value::String(status));
    }
    if scores.len() >= 2 {
        record.insert("homeScore".into(), Value::String(scores[0].clone()));
        record.insert(
            "awayScore".into(),
            Value::String(scores[scores.len() - 1].clone()),
        );
    }
    if let Some(link) = link {
        record.insert("link".into(), Value::String(link));
    }
    Value::Object(record)
}

fn section(title: Option<String>, cards: Vec<Value>) -> Value {
    let mut node = Map::new();
    if let Some(title) = title {
        node.insert("sectionHeader".into(), json!({ "title": title }));
    }
    node.insert("matchCards".into(), Value::Array(cards));
    Value::Object(node)
}

/// Scrapes match cards out of rendered markup and shapes them like an
/// embedded blob: `{"sections": [{"sectionHeader": {...}, "matchCards": [...]}]}`.
///
/// The result goes through the same matcher as any JSON source, so section
/// titles reach their cards through ordinary context propagation.
pub fn extract_dom_records(html: &str, selectors: &DomSelectors) -> ScraperResult<Value> {
    let compiled = Compiled::new(selectors)?;
    let document = Html::parse_document(html);

    let mut sections: Vec<Value> = document
        .select(&compiled.section)
        .map(|element| {
            let title = first_text(element, &compiled.section_title);
            let cards = element
                .select(&compiled.card)
                .map(|card| card_record(card, &compiled))
                .collect();
            section(title, cards)
        })
        .collect();

    if sections.is_empty() {
        let cards: Vec<Value> = document
            .select(&compiled.card)
            .map(|card| card_record(card, &compiled))
            .collect();
        if !cards.is_empty() {
            sections.push(section(None, cards));
        }
    }

    debug!("DOM fallback produced {} sections", sections.len());
    Ok(json!({ "sections": sections }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="xpaLayoutContainerFullWidth--matchCardsList">
          <h2 class="Title_leftAlign__x1">Liga 1</h2>
          <a class="MatchCard_matchCard__a1" href="/id/pertandingan/persija-persib-1">
            <span class="Team_team__name__q1">Persija</span>
            <img src="https://img.example/home.png?w=64&h=64">
            <span class="Team_team__name__q1">Persib</span>
            <img src="https://img.example/away.png?w=64&h=64">
            <time datetime="2026-01-07T12:30:00Z">19:30</time>
          </a>
          <a class="MatchCard_matchCard__a1" href="/id/pertandingan/bali-psm-2">
            <span class="Team_team__name__q1">Bali United</span>
            <span class="Score__score__z">2</span>
            <span class="Team_team__name__q1">PSM</span>
            <span class="Score__score__z">1</span>
            <span class="Card__infoMessage__m">FT</span>
          </a>
        </div>"#;

    #[test]
    fn cards_are_grouped_under_their_section_title() {
        let value = extract_dom_records(PAGE, &DomSelectors::default()).unwrap();
        let section = &value["sections"][0];
        assert_eq!(section["sectionHeader"]["title"], "Liga 1");

        let cards = section["matchCards"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["homeTeam"]["name"], "Persija");
        assert_eq!(cards[0]["awayTeam"]["logo"], "https://img.example/away.png?w=64&h=64");
        assert_eq!(cards[0]["kickoff"], "2026-01-07T12:30:00Z");
        assert_eq!(cards[0]["link"], "/id/pertandingan/persija-persib-1");
        assert_eq!(cards[1]["homeScore"], "2");
        assert_eq!(cards[1]["awayScore"], "1");
        assert_eq!(cards[1]["status"], "FT");
    }

    #[test]
    fn falls_back_to_span_heuristics_without_name_classes() {
        let html = r#"<a href="/match/9"><time>20:00</time><span>Arsenal</span><span>20:00</span><span>Chelsea</span></a>"#;
        let value = extract_dom_records(html, &DomSelectors::default()).unwrap();
        let card = &value["sections"][0]["matchCards"][0];
        assert_eq!(card["homeTeam"]["name"], "Arsenal");
        assert_eq!(card["awayTeam"]["name"], "Chelsea");
        assert_eq!(card["kickoff"], "20:00");
        assert!(value["sections"][0].get("sectionHeader").is_none());
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let selectors = DomSelectors {
            card: "a[".to_string(),
            ..Default::default()
        };
        assert!(extract_dom_records(PAGE, &selectors).is_err());
    }
}
