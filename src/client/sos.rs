//! The SOS delivery report.
//!
//! The backend's `/sos` response is loose: every field may be missing
//! depending on which messaging channels are configured and whether the
//! user has contacts. [`SosReport::from_json`] reads whatever is present and
//! never fails; the UI renders each part that came back.

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Sms,
}

impl Channel {
    pub fn title(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "WhatsApp Status",
            Channel::Sms => "SMS Status",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "💬",
            Channel::Sms => "📱",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "whatsapp",
            Channel::Sms => "sms",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Sent,
    Failed(String),
}

/// Delivery result for one contact on one channel.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryLine {
    pub name: String,
    pub phone: String,
    pub outcome: Outcome,
}

impl DeliveryLine {
    pub fn is_sent(&self) -> bool {
        matches!(self.outcome, Outcome::Sent)
    }

    pub fn text(&self, channel: Channel) -> String {
        match &self.outcome {
            Outcome::Sent => format!(
                "✅ {} ({}) - {} sent successfully",
                self.name,
                self.phone,
                channel.title()
            ),
            Outcome::Failed(reason) => {
                format!("❌ {} ({}) - Failed: {}", self.name, self.phone, reason)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChannelBody {
    Delivery {
        sent: usize,
        failed: usize,
        lines: Vec<DeliveryLine>,
    },
    /// Channel enabled but the backend had nobody to send to.
    NoRecipients,
    /// Channel disabled; carries the backend's warning.
    NotConfigured(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChannelReport {
    pub channel: Channel,
    pub body: ChannelBody,
}

impl ChannelReport {
    /// A channel block exists when the channel is enabled or the backend
    /// sent a non-empty warning for it.
    fn from_json(channel: Channel, data: &Value) -> Option<Self> {
        let enabled = data
            .get(format!("{}_enabled", channel.key()))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let warning = non_empty_str(data, &format!("{}_warning", channel.key()));

        let body = if enabled {
            let lines: Vec<DeliveryLine> = data
                .get(format!("{}_results", channel.key()))
                .and_then(Value::as_array)
                .map(|results| results.iter().map(delivery_line).collect())
                .unwrap_or_default();
            if lines.is_empty() {
                ChannelBody::NoRecipients
            } else {
                let sent = lines.iter().filter(|l| l.is_sent()).count();
                ChannelBody::Delivery {
                    sent,
                    failed: lines.len() - sent,
                    lines,
                }
            }
        } else {
            ChannelBody::NotConfigured(warning?)
        };

        Some(ChannelReport { channel, body })
    }

    pub fn heading(&self) -> String {
        format!("{} {}", self.channel.icon(), self.channel.title())
    }

    /// Bold summary lines above the per-contact list.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let ChannelBody::Delivery { sent, failed, .. } = &self.body {
            if *sent > 0 {
                lines.push(format!("✅ {} sent to {} contact(s)", self.channel.title(), sent));
            }
            if *failed > 0 {
                lines.push(format!("❌ Failed to send to {} contact(s)", failed));
            }
        }
        lines
    }

    pub fn no_recipients_text(&self) -> String {
        format!("No contacts to send {} to.", self.channel.title())
    }

    pub fn not_configured_label(&self) -> String {
        format!("⚠️ {} Not Configured:", self.channel.title())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapLink {
    Url(String),
    /// The backend had no coordinates and sent a description instead.
    Unavailable(String),
}

/// Manual `wa.me` link the user can open when automatic sending is off.
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackLink {
    pub name: String,
    pub phone: String,
    pub link: String,
}

impl FallbackLink {
    pub fn label(&self) -> String {
        format!("Message {} on WhatsApp", self.name)
    }
}

pub const NO_CONTACTS_TEXT: &str = "No trusted contacts found. Please add contacts first.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SosReport {
    /// WhatsApp first, then SMS; only channels with something to show.
    pub channels: Vec<ChannelReport>,
    pub warning: Option<String>,
    pub map: Option<MapLink>,
    pub fallback_links: Vec<FallbackLink>,
    /// True only when the backend reported exactly zero contacts.
    pub no_contacts: bool,
}

impl SosReport {
    pub fn from_json(data: &Value) -> Self {
        let channels = [Channel::WhatsApp, Channel::Sms]
            .into_iter()
            .filter_map(|channel| ChannelReport::from_json(channel, data))
            .collect();

        let map = non_empty_str(data, "google_maps_link").map(|link| {
            if link.starts_with("http://") || link.starts_with("https://") {
                MapLink::Url(link)
            } else {
                MapLink::Unavailable(link)
            }
        });

        let fallback_links = data
            .get("whatsapp_links")
            .and_then(Value::as_array)
            .map(|links| {
                links
                    .iter()
                    .filter_map(|entry| {
                        Some(FallbackLink {
                            name: str_field(entry, "name"),
                            phone: str_field(entry, "phone"),
                            link: non_empty_str(entry, "link")?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let no_contacts = data
            .get("contact_count")
            .and_then(Value::as_f64)
            .is_some_and(|count| count == 0.0);

        SosReport {
            channels,
            warning: non_empty_str(data, "warning"),
            map,
            fallback_links,
            no_contacts,
        }
    }
}

fn delivery_line(result: &Value) -> DeliveryLine {
    let outcome = match result.get("status").and_then(Value::as_str) {
        Some("sent") => Outcome::Sent,
        _ => Outcome::Failed(
            non_empty_str(result, "error").unwrap_or_else(|| "Unknown error".to_string()),
        ),
    };
    DeliveryLine {
        name: str_field(result, "name"),
        phone: str_field(result, "phone"),
        outcome,
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
