//! HTML rendering of the report page.
//!
//! Produces one self-contained document: inline CSS, the header, three
//! tabs (statistics, maps, raw data), and the footer. The only external
//! resources are the font stylesheet, Leaflet, the tile server, and the
//! embedded widget.

use std::fmt::Write as _;

use htmlize::{escape_attribute, escape_text};
use khalidiya_report_models::{
    BuildingRecord, ChartSettings, FilterSettings, FooterLogo, MapSection, MapView, ReportConfig,
    StatCard, WidgetSettings,
};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Renders the full report page.
#[must_use]
pub fn render_page(
    config: &ReportConfig,
    map: &MapSection,
    buildings: &[BuildingRecord],
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{page_title}</title>
    <link rel="stylesheet" href="{font_stylesheet}">
    <link rel="stylesheet" href="{leaflet_css}">
    <style>{theme}{css}</style>
</head>
<body>
    <div class="container">
        {header}
        <nav class="tab-list" role="tablist">
            <button class="tab" role="tab" aria-selected="true" data-tab="tab-statistics">{tab_statistics}</button>
            <button class="tab" role="tab" aria-selected="false" data-tab="tab-maps">{tab_maps}</button>
            <button class="tab" role="tab" aria-selected="false" data-tab="tab-raw">{tab_raw}</button>
        </nav>
        <section id="tab-statistics" class="tab-panel">
            {stat_cards}
            {chart}
        </section>
        <section id="tab-maps" class="tab-panel" hidden>
            {widget}
            {map}
        </section>
        <section id="tab-raw" class="tab-panel" hidden>
            <div class="raw-data">
                {table}
                {filters}
            </div>
        </section>
        {footer}
    </div>
    <script src="{leaflet_js}"></script>
    <script>{tabs_js}</script>
    {map_script}
</body>
</html>"#,
        lang = escape_attribute(config.lang.as_str()),
        dir = escape_attribute(config.dir.as_str()),
        page_title = escape_text(config.page_title.as_str()),
        font_stylesheet = escape_attribute(config.font_stylesheet.as_str()),
        leaflet_css = LEAFLET_CSS,
        leaflet_js = LEAFLET_JS,
        theme = render_theme(config),
        css = inline_css(),
        header = render_header(config),
        tab_statistics = escape_text(config.tabs.statistics.as_str()),
        tab_maps = escape_text(config.tabs.maps.as_str()),
        tab_raw = escape_text(config.tabs.raw_data.as_str()),
        stat_cards = render_stat_cards(&config.metrics),
        chart = render_chart(&config.chart, &config.palette),
        widget = render_widget(&config.widget),
        map = render_map(&config.map.title, map),
        table = render_building_table(config, buildings),
        filters = render_filters(&config.filters, &config.buildings.statuses),
        footer = render_footer(&config.footer, &config.footer_logos),
        tabs_js = TABS_JS,
        map_script = render_map_script(map),
    )
}

/// CSS custom properties derived from the config.
fn render_theme(config: &ReportConfig) -> String {
    let mut css = String::from(":root {");
    // Sanitized rather than escaped: this lands inside a <style> block.
    let _ = write!(css, " --font: {};", css_value(&config.font_family));
    for i in 0..5 {
        if let Some(color) = config.palette.get(i % config.palette.len().max(1)) {
            let _ = write!(css, " --c{i}: {};", css_value(color));
        }
    }
    css.push_str(" }");
    css
}

/// Strips characters that could end a declaration or the style block.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

fn render_header(config: &ReportConfig) -> String {
    format!(
        r#"<header class="header-container">
            <h1>{}</h1>
            <p>{}</p>
        </header>"#,
        escape_text(config.title.as_str()),
        escape_text(config.subtitle.as_str()),
    )
}

fn render_stat_cards(metrics: &[StatCard]) -> String {
    let mut html = String::from(r#"<div class="stats-grid">"#);
    for card in metrics {
        let _ = write!(
            html,
            r#"<div class="stats-card"><div class="stats-value">{}</div><div class="stats-label">{}</div></div>"#,
            escape_text(card.value.as_str()),
            escape_text(card.label.as_str()),
        );
    }
    html.push_str("</div>");
    html
}

fn render_chart(chart: &ChartSettings, palette: &[String]) -> String {
    let mut html = format!(
        r#"<h2>{}</h2><div class="bar-chart" role="img" aria-label="{} / {}">"#,
        escape_text(chart.title.as_str()),
        escape_attribute(chart.category_label.as_str()),
        escape_attribute(chart.value_label.as_str()),
    );
    for (i, bar) in chart.bars.iter().enumerate() {
        let color = palette
            .get(i % palette.len().max(1))
            .map_or_else(String::new, |c| css_value(c));
        let _ = write!(
            html,
            r#"<div class="bar"><div class="bar-fill" style="height: {percent}%; background: {color};"></div><div class="bar-value">{percent}%</div><div class="bar-label">{label}</div></div>"#,
            percent = bar.percent.min(100),
            color = escape_attribute(color.as_str()),
            label = escape_text(bar.label.as_str()),
        );
    }
    html.push_str("</div>");
    html
}

fn render_widget(widget: &WidgetSettings) -> String {
    format!(
        r#"<details class="expander" open>
            <summary>{title}</summary>
            <iframe src="{url}" width="100%" height="{height}" frameborder="0" allowfullscreen loading="lazy"></iframe>
        </details>"#,
        title = escape_text(widget.title.as_str()),
        url = escape_attribute(widget.url.as_str()),
        height = widget.height,
    )
}

fn render_map(title: &str, map: &MapSection) -> String {
    let body = match map {
        MapSection::Ready(view) => format!(
            r#"<div class="map-container"><div id="boundary-map" style="width: 100%; max-width: {}px; height: {}px;"></div></div>"#,
            view.width, view.height,
        ),
        MapSection::Unavailable { message } => format!(
            r#"<div class="error" role="alert">{}</div>"#,
            escape_text(message.as_str())
        ),
    };

    format!(
        r#"<details class="expander" open>
            <summary>{}</summary>
            {body}
        </details>"#,
        escape_text(title),
    )
}

/// Leaflet bootstrap for a ready map; empty when the map is unavailable.
fn render_map_script(map: &MapSection) -> String {
    let MapSection::Ready(view) = map else {
        return String::new();
    };

    format!(
        r"<script>
const view = {};
const map = L.map('boundary-map').setView([view.center.lat, view.center.lon], view.zoom);
L.tileLayer(view.tiles.urlTemplate, {{ attribution: view.tiles.attribution, subdomains: 'abcd', maxZoom: 20 }}).addTo(map);
L.geoJSON(view.overlay, {{ style: () => ({{ color: view.style.color, weight: view.style.weight }}) }}).addTo(map);
</script>",
        script_json(view),
    )
}

/// Serializes the view for embedding inside a `<script>` element.
fn script_json(view: &MapView) -> String {
    serde_json::to_string(view)
        .unwrap_or_else(|e| {
            log::error!("Failed to serialize map view: {e}");
            "null".to_string()
        })
        .replace("</", "<\\/")
}

fn render_building_table(config: &ReportConfig, buildings: &[BuildingRecord]) -> String {
    let settings = &config.buildings;
    let mut html = format!(
        r#"<div class="table-column"><h2>{}</h2><table class="data-table"><thead><tr><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>"#,
        escape_text(settings.title.as_str()),
        escape_text(settings.area_label.as_str()),
        escape_text(settings.floors_label.as_str()),
        escape_text(settings.status_label.as_str()),
    );
    for row in buildings {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.area_sq_m,
            row.floors,
            escape_text(row.status.as_str()),
        );
    }
    html.push_str("</tbody></table></div>");
    html
}

/// Filter controls. Nothing listens to them.
fn render_filters(filters: &FilterSettings, statuses: &[String]) -> String {
    let options = statuses.iter().fold(String::new(), |mut acc, status| {
        let _ = write!(
            acc,
            r#"<option value="{}">{}</option>"#,
            escape_attribute(status.as_str()),
            escape_text(status.as_str()),
        );
        acc
    });
    let (low, high) = filters.floors_default;

    format!(
        r#"<div class="filter-column">
            <h2>{title}</h2>
            <label>{status_label}<select multiple name="status">{options}</select></label>
            <label>{floors_label}
                <input type="range" name="floors-from" min="{min}" max="{max}" value="{low}">
                <input type="range" name="floors-to" min="{min}" max="{max}" value="{high}">
            </label>
            <button type="button">{apply}</button>
        </div>"#,
        title = escape_text(filters.title.as_str()),
        status_label = escape_text(filters.status_label.as_str()),
        floors_label = escape_text(filters.floors_label.as_str()),
        min = filters.floors_min,
        max = filters.floors_max,
        apply = escape_text(filters.apply_label.as_str()),
    )
}

fn render_footer(text: &str, logos: &[FooterLogo]) -> String {
    let logos = if logos.is_empty() {
        String::new()
    } else {
        let images: String = logos
            .iter()
            .map(|logo| {
                format!(
                    r#"<img src="{}" alt="{}" width="40">"#,
                    escape_attribute(logo.src.as_str()),
                    escape_attribute(logo.alt.as_str())
                )
            })
            .collect();
        format!(r#"<div class="footer-logos">{images}</div>"#)
    };

    format!(
        r#"<footer class="footer">{logos}<p>{}</p></footer>"#,
        escape_text(text)
    )
}

const TABS_JS: &str = r"
document.querySelectorAll('.tab').forEach((tab) => {
    tab.addEventListener('click', () => {
        document.querySelectorAll('.tab').forEach((t) => t.setAttribute('aria-selected', 'false'));
        document.querySelectorAll('.tab-panel').forEach((p) => { p.hidden = true; });
        tab.setAttribute('aria-selected', 'true');
        document.getElementById(tab.dataset.tab).hidden = false;
        window.dispatchEvent(new Event('resize'));
    });
});
";

/// Static stylesheet; colors and font come from [`render_theme`].
const fn inline_css() -> &'static str {
    r#"
* { font-family: var(--font) !important; box-sizing: border-box; }
body { margin: 0; background: #fdfdfd; color: #1f2933; }
.container { max-width: 1400px; margin: 0 auto; padding: 1rem 2rem; }

.header-container {
    background: linear-gradient(135deg, var(--c0) 0%, var(--c2) 30%, var(--c1) 70%, var(--c3) 100%);
    background-size: 400% 400%;
    animation: gradientBG 15s ease infinite;
    padding: 3rem;
    border-radius: 25px;
    box-shadow: 0 12px 24px rgba(0,0,0,0.3);
    color: white;
    margin: 2rem 0;
    text-align: center;
}
.header-container h1 { margin: 0; font-size: 2.8rem; }
.header-container p { margin: 0.5rem 0 0; font-size: 1.2rem; }
@keyframes gradientBG {
    0% { background-position: 0% 50%; }
    50% { background-position: 100% 50%; }
    100% { background-position: 0% 50%; }
}

.tab-list { display: flex; gap: 15px; margin: 2rem 0; }
.tab {
    background: rgba(255,255,255,0.9);
    border-radius: 15px;
    padding: 1rem 2rem;
    border: 2px solid var(--c2);
    cursor: pointer;
    transition: all 0.3s ease;
}
.tab[aria-selected="true"] { background: var(--c0); color: white; }

.stats-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.stats-card {
    background: rgba(255, 255, 255, 0.95);
    border-radius: 20px;
    padding: 2rem;
    box-shadow: 0 8px 32px rgba(0,0,0,0.1);
    border-inline-start: 5px solid var(--c0);
    transition: transform 0.3s ease;
}
.stats-card:hover { transform: translateY(-8px); }
.stats-value {
    font-size: 2.8rem;
    font-weight: 700;
    background: linear-gradient(45deg, var(--c1), var(--c3));
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
}

.bar-chart { display: flex; align-items: flex-end; gap: 2rem; height: 320px; padding: 1rem; }
.bar { flex: 1; display: flex; flex-direction: column; justify-content: flex-end; height: 100%; text-align: center; }
.bar-fill { border-radius: 8px 8px 0 0; }

.expander { margin: 1.5rem 0; border: 1px solid #e5e7eb; border-radius: 12px; padding: 1rem; }
.expander summary { cursor: pointer; font-weight: 700; }
.map-container { border-radius: 20px; overflow: hidden; border: 2px solid var(--c3); margin-top: 1rem; }
.error { background: #fdecea; color: #b42318; padding: 1rem; border-radius: 8px; margin-top: 1rem; }

.raw-data { display: grid; grid-template-columns: 2fr 1fr; gap: 2rem; }
.data-table { width: 100%; border-collapse: collapse; }
.data-table th, .data-table td { padding: 0.5rem; border-bottom: 1px solid #e5e7eb; text-align: start; }
.filter-column label { display: block; margin-bottom: 1rem; }
.filter-column select, .filter-column input { display: block; width: 100%; }

.footer { text-align: center; margin-top: 4rem; padding: 1.5rem; background: #f8f9fa; border-radius: 15px; color: #666; }
.footer-logos { display: flex; justify-content: center; gap: 1rem; margin-bottom: 1rem; }
"#
}

#[cfg(test)]
mod tests {
    use khalidiya_boundary_models::LatLon;
    use khalidiya_report_models::{OverlayStyle, TileLayer};

    use super::*;
    use crate::config::default_config;

    fn rows() -> Vec<BuildingRecord> {
        vec![
            BuildingRecord {
                area_sq_m: 120,
                floors: 2,
                status: "مدمر".to_string(),
            },
            BuildingRecord {
                area_sq_m: 75,
                floors: 1,
                status: "سليم".to_string(),
            },
        ]
    }

    fn ready_map() -> MapSection {
        MapSection::Ready(MapView {
            center: LatLon::new(34.736, 36.708),
            zoom: 15,
            tiles: TileLayer {
                id: "cartodbpositron".to_string(),
                url_template: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
                    .to_string(),
                attribution: "CARTO".to_string(),
            },
            overlay: serde_json::json!({
                "type": "Feature",
                "properties": { "name": "</script><b>" },
                "geometry": null
            }),
            style: OverlayStyle {
                color: "red".to_string(),
                weight: 3,
            },
            width: 1200,
            height: 600,
        })
    }

    #[test]
    fn renders_every_static_section() {
        let config = default_config();
        let html = render_page(&config, &ready_map(), &rows());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="ar" dir="rtl">"#));
        assert!(html.contains(&config.title));
        for card in &config.metrics {
            assert!(html.contains(&card.label), "missing metric {}", card.label);
        }
        for bar in &config.chart.bars {
            assert!(html.contains(&format!("height: {}%", bar.percent)));
        }
        assert!(html.contains("widgets.scribblemaps.com/sm/?id=7pmremiid2&amp;z=17&amp;type=hybrid"));
        assert!(html.contains(r#"height="600""#));
        assert!(html.contains(&config.footer));
        assert!(html.contains("--c0: #2A9D8F;"));
    }

    #[test]
    fn footer_shows_logos_above_the_caption() {
        let mut config = default_config();
        let html = render_page(&config, &ready_map(), &rows());

        assert_eq!(html.matches(r#"<img src="#).count(), 3);
        let logos_at = html.find(r#"<div class="footer-logos">"#).unwrap();
        let caption_at = html.find(&format!("<p>{}</p>", config.footer)).unwrap();
        assert!(logos_at < caption_at);
        assert!(html.contains(r#"alt="Leaflet""#));

        config.footer_logos.clear();
        let html = render_page(&config, &ready_map(), &rows());
        assert!(!html.contains(r#"<div class="footer-logos">"#));
        assert!(!html.contains("<img "));
    }

    #[test]
    fn ready_map_embeds_view_and_leaflet_bootstrap() {
        let html = render_page(&default_config(), &ready_map(), &rows());

        assert!(html.contains(r#"id="boundary-map""#));
        assert!(html.contains("L.map('boundary-map')"));
        assert!(html.contains(r#""zoom":15"#));
        assert!(html.contains(r#""color":"red""#));
        // Script-breaking sequences in the overlay are neutralized.
        assert!(!html.contains("</script><b>"));
        assert!(html.contains(r"<\/script><b>"));
    }

    #[test]
    fn unavailable_map_shows_message_and_skips_script() {
        let map = MapSection::Unavailable {
            message: "خطأ في تحميل البيانات: Boundary file not found: <x>".to_string(),
        };
        let html = render_page(&default_config(), &map, &rows());

        assert!(html.contains(r#"<div class="error" role="alert">"#));
        assert!(html.contains("خطأ في تحميل البيانات: Boundary file not found: &lt;x&gt;"));
        assert!(!html.contains("L.map("));
        // The rest of the page is still there.
        assert!(html.contains("stats-card"));
        assert!(html.contains("<tbody>"));
    }

    #[test]
    fn table_has_one_row_per_record_and_unwired_filters() {
        let config = default_config();
        let html = render_page(&config, &ready_map(), &rows());

        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("<tr><td>120</td><td>2</td><td>مدمر</td></tr>"));
        assert!(html.contains("<select multiple"));
        for status in &config.buildings.statuses {
            assert!(html.contains(&format!(r#"<option value="{status}">"#)));
        }
        assert!(html.contains(r#"name="floors-from" min="1" max="5" value="1""#));
        assert!(html.contains(r#"name="floors-to" min="1" max="5" value="3""#));
        assert!(html.contains(&config.filters.apply_label));
    }

    #[test]
    fn text_is_escaped() {
        let mut config = default_config();
        config.title = "<script>alert(1)</script>".to_string();
        config.palette = vec!["red;}</style>".to_string()];

        let html = render_page(&config, &ready_map(), &[]);

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("red;}</style>"));
        assert!(html.contains("--c4: red/style;"));
    }
}
