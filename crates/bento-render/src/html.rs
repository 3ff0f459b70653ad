//! Static HTML writer.
//!
//! The page carries two sections, one per breakpoint. The desktop section
//! keeps dataset order on the explicit 9-column grid; the mobile section
//! is the reflowed 2-column flow. A media query shows exactly one of them.

use std::fmt::Write as _;

use bento_ui::grid::{DESKTOP_BREAKPOINT_PX, DESKTOP_GRID, GridSpec, MOBILE_GRID};
use bento_ui::{Icon, TiltStyle};
use bento_types::Dataset;

use crate::click::OpenRequest;
use crate::compose::{
    Background, BadgeTint, FeedLookup, MAP_SANDBOX, MediaKind, Tile, TileBody, desktop_tiles,
    mobile_tiles,
};
use crate::utility::utility_css;

/// Push HTML-escaped text into a string.
fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// CSS `url(...)` value with the URL quoted.
fn css_url(url: &str) -> String {
    format!("url('{}')", url.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"");
    push_escaped(out, value);
    out.push('"');
}

/// Glyph rules for every icon class, plus the spinner ring.
fn icon_css() -> String {
    let mut css = String::from(
        ".icon{display:inline-flex;align-items:center;justify-content:center;\
         min-width:1.5em;height:1.5em;font-weight:700;line-height:1}\
         .icon-spinner{width:1.5em;border:2px solid currentColor;border-right-color:transparent;\
         border-radius:50%;animation:bento-spin .8s linear infinite}\
         @keyframes bento-spin{to{transform:rotate(360deg)}}",
    );
    for icon in Icon::ALL {
        let glyph = icon.glyph();
        if !glyph.is_empty() {
            let _ = write!(css, ".{}::before{{content:\"{glyph}\"}}", icon.css_class());
        }
    }
    css
}

/// Page stylesheet: layout, icons, and the color classes `tiles` use.
fn stylesheet(tiles: &[Tile]) -> String {
    let grid = |spec: &GridSpec| spec.container_css();
    let classes = tiles.iter().flat_map(|t| {
        let background = match &t.background {
            Some(Background::Class(c)) => Some(c.as_str()),
            _ => None,
        };
        background.into_iter().chain(t.text_class.as_deref())
    });
    let layout = format!(
        "*{{box-sizing:border-box;margin:0}}\
         body{{font-family:system-ui,sans-serif;background:#f8fafc}}\
         .bento-desktop{{display:none;padding:48px}}\
         .bento-mobile{{{mobile}padding:16px}}\
         @media (min-width:{bp}px){{\
         .bento-desktop{{{desktop}}}\
         .bento-mobile{{display:none}}}}\
         .tile{{position:relative;overflow:hidden;height:100%;display:block;color:inherit;text-decoration:none}}\
         .tile .glare{{position:absolute;inset:0;pointer-events:none;opacity:0;\
         background:radial-gradient(circle at var(--glare-x,50%) var(--glare-y,50%),rgba(255,255,255,0.25) 0%,transparent 60%)}}\
         .tile:hover .glare{{opacity:1}}\
         .tile .scrim{{position:absolute;left:0;right:0;bottom:0;height:66%;\
         background:linear-gradient(to top,rgba(0,0,0,0.7),rgba(0,0,0,0.3),transparent)}}\
         .tile .full-img{{width:100%;height:100%;object-fit:cover}}\
         .tile iframe{{width:100%;height:100%;border:0}}\
         .tile .videos{{display:grid;grid-template-columns:repeat(2,1fr);gap:4px}}\
         .tile .video-header{{display:flex;align-items:center;gap:8px;color:inherit;text-decoration:none}}\
         .tile .body{{white-space:pre-wrap}}",
        mobile = grid(&MOBILE_GRID),
        desktop = grid(&DESKTOP_GRID),
        bp = DESKTOP_BREAKPOINT_PX,
    );
    layout + &icon_css() + &utility_css(classes)
}

fn push_icon(out: &mut String, icon: Icon, color: Option<String>) {
    out.push_str("<span");
    push_attr(out, "class", &format!("icon {}", icon.css_class()));
    if let Some(color) = color {
        push_attr(out, "style", &format!("color:{color}"));
    }
    out.push_str("></span>");
}

fn push_text(out: &mut String, tag: &str, class: &str, text: &str) {
    let _ = write!(out, "<{tag} class=\"{class}\">");
    push_escaped(out, text);
    let _ = write!(out, "</{tag}>");
}

fn push_link_open(out: &mut String, class: Option<&str>, href: &str) {
    out.push_str("<a");
    if let Some(class) = class {
        push_attr(out, "class", class);
    }
    push_attr(out, "href", href);
    push_attr(out, "target", OpenRequest::TARGET);
    push_attr(out, "rel", OpenRequest::REL);
    out.push('>');
}

fn push_body(out: &mut String, tile: &Tile) {
    match &tile.body {
        TileBody::Spacer => {},
        TileBody::SocialIcon { icon, color } => {
            if let Some(icon) = icon {
                push_icon(out, *icon, color.map(|c| c.to_string()));
            }
        },
        TileBody::VideoGrid {
            header,
            loading,
            videos,
        } => {
            // The header carries the channel link; thumbnails are siblings.
            let header_tag = match tile.click.as_deref() {
                Some(href) => {
                    push_link_open(out, Some("video-header"), href);
                    "a"
                },
                None => {
                    out.push_str("<div class=\"video-header\">");
                    "div"
                },
            };
            push_icon(out, Icon::YouTube, None);
            push_text(out, "h3", "channel-title", header);
            let _ = write!(out, "<span class=\"subtitle\">Latest videos</span></{header_tag}>");
            if *loading {
                out.push_str("<div class=\"loading\">");
                push_icon(out, Icon::Spinner, None);
                out.push_str("</div>");
            } else {
                out.push_str("<div class=\"videos\">");
                for video in videos {
                    push_link_open(out, None, &video.href);
                    out.push_str("<img");
                    push_attr(out, "src", &video.thumbnail);
                    push_attr(out, "alt", &video.title);
                    out.push_str(" loading=\"lazy\">");
                    push_icon(out, Icon::Play, None);
                    out.push_str("</a>");
                }
                out.push_str("</div>");
            }
        },
        TileBody::VideoHero { caption, .. } => {
            out.push_str("<div class=\"play\">");
            push_icon(out, Icon::Play, None);
            out.push_str("</div>");
            if let Some(caption) = caption {
                push_text(out, "h3", "caption", caption);
            }
        },
        TileBody::Media {
            kind,
            url,
            position,
            alt,
            caption,
        } => {
            let style = format!("object-position:{}% {}%", position.x, position.y);
            match kind {
                MediaKind::Video => {
                    out.push_str("<video class=\"full-img\"");
                    push_attr(out, "src", url);
                    push_attr(out, "style", &style);
                    out.push_str(" autoplay loop muted playsinline></video>");
                },
                MediaKind::Image => {
                    out.push_str("<img class=\"full-img\"");
                    push_attr(out, "src", url);
                    push_attr(out, "alt", alt);
                    push_attr(out, "style", &style);
                    out.push('>');
                },
            }
            if let Some(caption) = caption {
                out.push_str("<div class=\"media-overlay\">");
                push_text(out, "p", "media-title", &caption.title);
                if let Some(subtext) = &caption.subtext {
                    push_text(out, "p", "media-subtext", subtext);
                }
                out.push_str("</div>");
            }
        },
        TileBody::Map { embed_url, caption } => {
            out.push_str("<iframe");
            push_attr(out, "src", embed_url);
            push_attr(out, "sandbox", MAP_SANDBOX);
            out.push_str(" loading=\"lazy\"></iframe>");
            if let Some(caption) = caption {
                push_text(out, "p", "caption", caption);
            }
        },
        TileBody::Text {
            title,
            subtext,
            body,
        } => {
            out.push_str("<div class=\"text centered\">");
            if let Some(title) = title {
                push_text(out, "h3", "title", title);
            }
            if let Some(subtext) = subtext {
                push_text(out, "p", "subtext", subtext);
            }
            if let Some(body) = body {
                push_text(out, "p", "body", body);
            }
            out.push_str("</div>");
        },
        TileBody::Card {
            badge,
            title,
            subtext,
            followers,
            on_image,
        } => {
            out.push_str("<div class=\"card\">");
            if let Some(badge) = badge {
                let (class, color) = match badge.tint {
                    BadgeTint::Brand(c) => ("badge", Some(c.to_string())),
                    BadgeTint::Translucent => ("badge translucent", None),
                    BadgeTint::Neutral => ("badge neutral", None),
                };
                let _ = write!(out, "<div class=\"{class}\">");
                push_icon(out, badge.icon, color);
                out.push_str("</div>");
            }
            let on_image = if *on_image { " on-image" } else { "" };
            let _ = write!(out, "<div class=\"card-text{on_image}\">");
            if let Some(title) = title {
                push_text(out, "h3", "title", title);
            }
            if let Some(subtext) = subtext {
                push_text(out, "p", "subtext", subtext);
            }
            if let Some(followers) = followers {
                push_text(out, "p", "followers", followers);
            }
            out.push_str("</div></div>");
        },
    }
}

/// Write one tile. `section` prefixes the element id so the desktop and
/// mobile copies of a block stay distinct; `data-block-id` carries the
/// block id itself.
pub fn write_tile(out: &mut String, section: &str, tile: &Tile) {
    let mut class = format!("tile tile-{}", tile.type_name.to_ascii_lowercase().replace('_', "-"));
    let mut style = tile.placement.css();
    let _ = write!(style, "border-radius:{};", tile.radius.css());

    match &tile.background {
        Some(Background::Class(c)) => {
            class.push(' ');
            class.push_str(c);
        },
        Some(Background::Custom(css)) => {
            let _ = write!(style, "background:{css};");
        },
        Some(Background::Cover { url, position }) => {
            let _ = write!(
                style,
                "background-image:{};background-size:cover;background-position:{}% {}%;",
                css_url(url),
                position.x,
                position.y
            );
        },
        None => {},
    }
    if let Some(text) = &tile.text_class {
        class.push(' ');
        class.push_str(text);
    }
    if tile.tilt {
        class.push_str(" tilt");
        style.push_str(&TiltStyle::rest().css());
    }

    // Galleries hold their own anchors, which cannot nest.
    let is_gallery = matches!(tile.body, TileBody::VideoGrid { .. });
    let anchor = tile.click.as_deref().filter(|_| !is_gallery);
    let tag = if anchor.is_some() { "a" } else { "div" };

    let _ = write!(out, "<{tag}");
    push_attr(out, "id", &format!("{section}-tile-{}", tile.id));
    push_attr(out, "data-block-id", &tile.id);
    push_attr(out, "class", &class);
    push_attr(out, "style", &style);
    if let Some(href) = anchor {
        push_attr(out, "href", href);
        push_attr(out, "target", OpenRequest::TARGET);
        push_attr(out, "rel", OpenRequest::REL);
    }
    out.push('>');

    if tile.tilt {
        out.push_str("<div class=\"glare\"></div>");
    }
    if tile.scrim {
        out.push_str("<div class=\"scrim\"></div>");
    }
    push_body(out, tile);
    let _ = write!(out, "</{tag}>");
}

fn write_section(out: &mut String, class: &str, section: &str, tiles: &[Tile]) {
    let _ = write!(out, "<section class=\"{class}\">");
    for tile in tiles {
        write_tile(out, section, tile);
    }
    out.push_str("</section>");
}

/// Render the complete page.
pub fn render_page(title: &str, dataset: &Dataset, feeds: &dyn FeedLookup) -> String {
    let desktop = desktop_tiles(dataset, feeds);
    let mobile = mobile_tiles(dataset, feeds);

    let mut out = String::with_capacity(4096 + dataset.len() * 512);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    out.push_str("<title>");
    push_escaped(&mut out, title);
    out.push_str("</title><style>");
    out.push_str(&stylesheet(&desktop));
    out.push_str("</style></head><body><main>");
    write_section(&mut out, "bento-desktop", "d", &desktop);
    write_section(&mut out, "bento-mobile", "m", &mobile);
    out.push_str("</main></body></html>\n");

    log::debug!(
        "rendered {} tiles ({} bytes)",
        dataset.len(),
        out.len()
    );
    out
}
