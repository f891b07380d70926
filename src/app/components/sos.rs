//! SOS delivery report overlay.

use dioxus::prelude::*;

use crate::app::context::use_client;
use crate::client::sos::{ChannelBody, ChannelReport, MapLink, SosReport, NO_CONTACTS_TEXT};
use crate::client::UiEvent;

#[component]
pub fn SosReportModal(report: SosReport) -> Element {
    let client = use_client();

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                h2 { "🚨 SOS Alert Sent" }

                for channel in report.channels.iter().cloned() {
                    ChannelBlock { report: channel }
                }

                if let Some(warning) = report.warning.clone() {
                    div { class: "general-warning",
                        strong { "⚠️ Warning:" }
                        " {warning}"
                    }
                }

                match report.map.clone() {
                    Some(MapLink::Url(url)) => rsx! {
                        a { class: "sos-link", href: "{url}", target: "_blank", rel: "noopener",
                            "📍 View Location on Google Maps"
                        }
                    },
                    Some(MapLink::Unavailable(text)) => rsx! {
                        p { class: "text-muted", "📍 {text}" }
                    },
                    None => rsx! {},
                }

                if !report.fallback_links.is_empty() {
                    h3 { "WhatsApp Quick Links (Fallback)" }
                    for link in report.fallback_links.iter().cloned() {
                        a {
                            class: "sos-link whatsapp",
                            href: "{link.link}",
                            target: "_blank",
                            rel: "noopener",
                            "{link.label()}"
                        }
                    }
                }

                if report.no_contacts {
                    p { class: "no-contacts", "{NO_CONTACTS_TEXT}" }
                }

                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| client.dispatch(UiEvent::CloseSosReport),
                    "Close"
                }
            }
        }
    }
}

#[component]
fn ChannelBlock(report: ChannelReport) -> Element {
    let channel = report.channel;
    let heading = report.heading();
    let summary = report.summary();

    rsx! {
        div { class: "status-display",
            h3 { "{heading}" }
            match report.body.clone() {
                ChannelBody::Delivery { lines, .. } => rsx! {
                    p { class: "summary",
                        for line in summary {
                            span { "{line}" }
                            br {}
                        }
                    }
                    ul { class: "delivery-lines",
                        for line in lines {
                            li {
                                class: if line.is_sent() { "sent" } else { "failed" },
                                "{line.text(channel)}"
                            }
                        }
                    }
                },
                ChannelBody::NoRecipients => rsx! {
                    p { class: "text-muted", "{report.no_recipients_text()}" }
                },
                ChannelBody::NotConfigured(warning) => rsx! {
                    p { class: "channel-warning",
                        strong { "{report.not_configured_label()}" }
                        " {warning}"
                    }
                },
            }
        }
    }
}
