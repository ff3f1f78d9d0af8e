use askama::Template;

use super::page::{Element, Page, Region, RegionKind, UiAction};
use crate::models::{Chart, TrendCategory};

const VOID_TAGS: [&str; 4] = ["img", "br", "hr", "input"];

/// One step of a depth-first walk over an element tree. The template turns
/// these back into tags, escaping every name, value and text.
#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Open(String, Vec<(String, String)>),
    Text(String),
    Close(String),
}

pub struct Section {
    pub title: String,
    pub markup: Vec<Markup>,
}

/// The whole page as a standalone HTML document: the trend lists first, each
/// under its heading, then every other region in id order.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub sections: Vec<Section>,
}

impl DashboardTemplate {
    pub fn new(page: &Page, chart: Option<&Chart>) -> Self {
        let mut sections = Vec::new();
        for category in TrendCategory::ALL {
            if let Some(region) = page.region(category.region_id()) {
                sections.push(Section {
                    title: category.title().to_string(),
                    markup: flatten(&region_element(region, chart)),
                });
            }
        }
        let lists: Vec<&str> = TrendCategory::ALL.iter().map(|c| c.region_id()).collect();
        for region in page.regions().filter(|r| !lists.contains(&r.id.as_str())) {
            sections.push(Section {
                title: String::new(),
                markup: flatten(&region_element(region, chart)),
            });
        }
        Self { sections }
    }
}

pub fn flatten(element: &Element) -> Vec<Markup> {
    let mut out = Vec::new();
    push_element(element, &mut out);
    out
}

fn push_element(element: &Element, out: &mut Vec<Markup>) {
    let mut attrs = Vec::with_capacity(element.attrs.len() + 2);
    if let Some(class) = &element.class {
        attrs.push(("class".to_string(), class.clone()));
    }
    attrs.extend(element.attrs.iter().cloned());
    if let Some(UiAction::ResolveDetail(symbol)) = &element.on_click {
        attrs.push(("data-symbol".to_string(), symbol.clone()));
    }
    out.push(Markup::Open(element.tag.clone(), attrs));

    if VOID_TAGS.contains(&element.tag.as_str()) {
        return;
    }
    if let Some(text) = &element.text {
        out.push(Markup::Text(text.clone()));
    }
    for child in &element.children {
        push_element(child, out);
    }
    out.push(Markup::Close(element.tag.clone()));
}

/// The region's container element with its current content.
fn region_element(region: &Region, chart: Option<&Chart>) -> Element {
    let tag = match region.kind {
        RegionKind::List => "ul",
        RegionKind::Selector => "select",
        RegionKind::Canvas => "canvas",
        RegionKind::Carousel | RegionKind::Panel => "div",
    };
    let mut root = Element::new(tag).attr("id", region.id.as_str());

    match region.kind {
        RegionKind::Selector => {
            for option in &region.options {
                let mut el = Element::new("option").attr("value", option.as_str());
                if region.value.as_deref() == Some(option.as_str()) {
                    el = el.attr("selected", "selected");
                }
                root = root.child(el.text(option.as_str()));
            }
        }
        RegionKind::Canvas => {
            if let Some(chart) = chart.filter(|c| c.canvas_id == region.id) {
                if let Ok(json) = serde_json::to_string(chart) {
                    root = root.attr("data-chart", json);
                }
                if let Ok(ticks) = serde_json::to_string(&chart.visible_ticks()) {
                    root = root.attr("data-ticks", ticks);
                }
            }
        }
        RegionKind::List | RegionKind::Carousel | RegionKind::Panel => {
            root.children = region.children.clone();
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartData, ChartOptions, PriceSeries};
    use crate::ui::page::{CHART_CANVAS, TICKER_SELECT};

    fn page_with(element: Element) -> Page {
        let mut page = Page::empty();
        page.insert(Region::new("panel", RegionKind::Panel));
        page.replace_children("panel", vec![element]).unwrap();
        page
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let el = Element::new("a")
            .attr("href", "https://x.test/?a=1&b=\"2\"")
            .text("<script>alert(1)</script>");
        let html = DashboardTemplate::new(&page_with(el), None).render().unwrap();
        assert!(html.contains(
            "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;alert(1)&lt;/script&gt;</a>"
        ));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_img_is_void() {
        let markup = flatten(&Element::new("img").attr("src", "a.png"));
        assert_eq!(
            markup,
            vec![Markup::Open("img".into(), vec![("src".into(), "a.png".into())])]
        );
        let html = DashboardTemplate::new(&page_with(Element::new("img").attr("src", "a.png")), None)
            .render()
            .unwrap();
        assert!(html.contains("<div id=\"panel\"><img src=\"a.png\"></div>"));
    }

    #[test]
    fn test_page_marks_selected_ticker() {
        let mut page = Page::standard();
        page.set_selector_value(TICKER_SELECT, "NVDA").unwrap();
        let html = DashboardTemplate::new(&page, None).render().unwrap();
        assert!(html.contains("<option value=\"NVDA\" selected=\"selected\">NVDA</option>"));
        assert!(html.contains("<option value=\"AAPL\">AAPL</option>"));
        assert!(html.contains("<h3>52-Week High Stocks</h3><ul id=\"high-list\"></ul>"));
    }

    #[test]
    fn test_canvas_carries_chart_and_visible_ticks() {
        let labels: Vec<String> = (0..25).map(|i| format!("t{}", i)).collect();
        let series = PriceSeries::new(labels, vec![1.0; 25], vec![2.0; 25], Vec::new()).unwrap();
        let chart = Chart::new(CHART_CANVAS, ChartData::from_series(&series), ChartOptions::default());

        let markup = flatten(&region_element(
            Page::standard().region(CHART_CANVAS).unwrap(),
            Some(&chart),
        ));
        let Markup::Open(tag, attrs) = &markup[0] else {
            panic!("expected an opening tag, got {:?}", markup[0]);
        };
        assert_eq!(tag, "canvas");
        let ticks = attrs.iter().find(|(name, _)| name == "data-ticks").unwrap();
        let ticks: Vec<String> = serde_json::from_str(&ticks.1).unwrap();
        assert!(ticks.len() <= 10);
        assert_eq!(ticks[0], "t0");
        assert!(attrs.iter().any(|(name, _)| name == "data-chart"));
    }

    #[test]
    fn test_canvas_without_chart_has_no_data() {
        let html = DashboardTemplate::new(&Page::standard(), None).render().unwrap();
        assert!(html.contains("<canvas id=\"stock-chart\"></canvas>"));
    }
}
