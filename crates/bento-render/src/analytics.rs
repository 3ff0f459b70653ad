//! Analytics event payloads and sinks.
//!
//! Events are best-effort: a sink never reports failure back to the page,
//! and with no endpoint configured the [`DisabledSink`] drops everything
//! without building payloads.

use bento_types::config::AnalyticsConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PageView,
    Click,
}

/// Campaign parameters read from the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Utm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Utm {
    /// Extract `utm_*` parameters from the query string of `url`.
    ///
    /// The first occurrence of each key wins; empty values count as absent.
    pub fn from_url(url: &str) -> Self {
        let mut utm = Utm::default();
        let Some((_, query)) = url.split_once('?') else {
            return utm;
        };
        let query = query.split('#').next().unwrap_or_default();
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match key {
                "utm_source" => &mut utm.source,
                "utm_medium" => &mut utm.medium,
                "utm_campaign" => &mut utm.campaign,
                "utm_term" => &mut utm.term,
                "utm_content" => &mut utm.content,
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            let value = value.replace('+', " ");
            let decoded = urlencoding::decode(&value)
                .map(|v| v.into_owned())
                .unwrap_or(value);
            if !decoded.is_empty() {
                *slot = Some(decoded);
            }
        }
        utm
    }
}

/// Facts about the page and its viewer, fixed for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub page_url: String,
    pub referrer: Option<String>,
    pub language: String,
    pub screen_w: u32,
    pub screen_h: u32,
}

/// One analytics event as sent to the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
    pub page_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    pub utm: Utm,
    pub language: String,
    pub screen_w: u32,
    pub screen_h: u32,
}

impl AnalyticsEvent {
    pub fn page_view(ctx: &PageContext) -> Self {
        Self::new(EventKind::PageView, ctx, None, None)
    }

    pub fn click(ctx: &PageContext, block_id: &str, destination: &str) -> Self {
        Self::new(
            EventKind::Click,
            ctx,
            Some(block_id.to_string()),
            Some(destination.to_string()),
        )
    }

    fn new(
        event: EventKind,
        ctx: &PageContext,
        block_id: Option<String>,
        destination_url: Option<String>,
    ) -> Self {
        Self {
            event,
            block_id,
            destination_url,
            page_url: ctx.page_url.clone(),
            referrer: ctx.referrer.clone().filter(|r| !r.is_empty()),
            utm: Utm::from_url(&ctx.page_url),
            language: ctx.language.clone(),
            screen_w: ctx.screen_w,
            screen_h: ctx.screen_h,
        }
    }

    /// JSON body of the event.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receiver of analytics events.
pub trait AnalyticsSink {
    fn record(&mut self, event: AnalyticsEvent);

    /// When false, callers skip building events at all.
    fn is_enabled(&self) -> bool {
        true
    }
}

impl<S: AnalyticsSink + ?Sized> AnalyticsSink for Box<S> {
    fn record(&mut self, event: AnalyticsEvent) {
        (**self).record(event);
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// Sink used when no endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSink;

impl AnalyticsSink for DisabledSink {
    fn record(&mut self, _event: AnalyticsEvent) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Sink that logs the payload destined for an endpoint.
#[derive(Debug, Clone)]
pub struct LogSink {
    endpoint: String,
}

impl LogSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalyticsSink for LogSink {
    fn record(&mut self, event: AnalyticsEvent) {
        match event.to_json() {
            Ok(body) => log::info!("analytics -> {}: {body}", self.endpoint),
            Err(e) => log::debug!("dropping analytics event: {e}"),
        }
    }
}

/// Sink that keeps events in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub events: Vec<AnalyticsEvent>,
}

impl AnalyticsSink for MemorySink {
    fn record(&mut self, event: AnalyticsEvent) {
        self.events.push(event);
    }
}

/// Sink for a configuration: disabled without an endpoint.
pub fn sink_for(config: &AnalyticsConfig) -> Box<dyn AnalyticsSink> {
    match config.endpoint.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => Box::new(LogSink::new(endpoint)),
        _ => Box::new(DisabledSink),
    }
}
