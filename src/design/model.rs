use uuid::Uuid;

use crate::models::{NewTicketDesign, Orientation, TicketDesign, TicketFormat};

/// Asset shown whenever a design has no logo of its own. Session state never
/// holds an absent logo; this stands in instead.
pub const PLACEHOLDER_LOGO: &str = "/assets/placeholder-logo.svg";

pub const FONT_SIZE_MIN: i32 = 10;
pub const FONT_SIZE_MAX: i32 = 24;
pub const BORDER_RADIUS_MIN: i32 = 0;
pub const BORDER_RADIUS_MAX: i32 = 20;

/// What the ticket says: per-event text, all display strings. Date, time and
/// price are deliberately not parsed types here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignContent {
    pub event_name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub ticket_number: String,
    pub ticket_type: String,
    pub price: String,
    pub qr_code: String,
    pub category: String,
    pub organizer: String,
    pub logo: String,
}

/// How the ticket looks. Colors are raw strings; whatever the picker emits is
/// stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignStyle {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub font_size: i32,
    pub border_radius: i32,
    pub orientation: Orientation,
    pub format: TicketFormat,
}

/// The full editable state of one ticket template: base template choice plus
/// the content/style pair. Every field always has a value, so any snapshot of
/// this state renders deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignState {
    pub template_id: String,
    pub content: DesignContent,
    pub style: DesignStyle,
}

impl Default for DesignContent {
    fn default() -> Self {
        Self {
            event_name: "Sample Event".to_string(),
            date: "2024-12-31".to_string(),
            time: "20:00".to_string(),
            location: "Convention Center".to_string(),
            ticket_number: "TKT-000001".to_string(),
            ticket_type: "General Admission".to_string(),
            price: "$50.00".to_string(),
            qr_code: "TICKET-QR-0001".to_string(),
            category: "General".to_string(),
            organizer: "Eventdesk".to_string(),
            logo: PLACEHOLDER_LOGO.to_string(),
        }
    }
}

impl Default for DesignStyle {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#1e40af".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#111827".to_string(),
            font_family: "Inter".to_string(),
            font_size: 14,
            border_radius: 8,
            orientation: Orientation::Horizontal,
            format: TicketFormat::Standard,
        }
    }
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            template_id: "classic".to_string(),
            content: DesignContent::default(),
            style: DesignStyle::default(),
        }
    }
}

/// One edit to a named field. The set of editable fields is closed, so an
/// unrecognized field cannot be expressed at all.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Template(String),
    EventName(String),
    Date(String),
    Time(String),
    Location(String),
    TicketNumber(String),
    TicketType(String),
    Price(String),
    QrCode(String),
    Category(String),
    Organizer(String),
    Logo(String),
    PrimaryColor(String),
    SecondaryColor(String),
    BackgroundColor(String),
    TextColor(String),
    FontFamily(String),
    FontSize(i32),
    BorderRadius(i32),
    Orientation(Orientation),
    Format(TicketFormat),
}

impl DesignState {
    /// Maps a stored design 1:1 into session state. A missing logo becomes
    /// the given placeholder asset, never an empty value.
    pub fn from_saved(design: &TicketDesign, placeholder_logo: &str) -> Self {
        Self {
            template_id: design.template_id.clone(),
            content: DesignContent {
                event_name: design.event_name.clone(),
                date: design.date.clone(),
                time: design.time.clone(),
                location: design.location.clone(),
                ticket_number: design.ticket_number.clone(),
                ticket_type: design.ticket_type.clone(),
                price: design.price.clone(),
                qr_code: design.qr_code.clone(),
                category: design.category.clone(),
                organizer: design.organizer.clone(),
                logo: design
                    .logo
                    .clone()
                    .unwrap_or_else(|| placeholder_logo.to_string()),
            },
            style: DesignStyle {
                primary_color: design.primary_color.clone(),
                secondary_color: design.secondary_color.clone(),
                background_color: design.background_color.clone(),
                text_color: design.text_color.clone(),
                font_family: design.font_family.clone(),
                font_size: design.font_size,
                border_radius: design.border_radius,
                orientation: design.orientation,
                format: design.format,
            },
        }
    }

    /// Replaces one field. Sizing fields clamp to their editable range; color
    /// strings are stored as-is.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Template(v) => self.template_id = v,
            FieldEdit::EventName(v) => self.content.event_name = v,
            FieldEdit::Date(v) => self.content.date = v,
            FieldEdit::Time(v) => self.content.time = v,
            FieldEdit::Location(v) => self.content.location = v,
            FieldEdit::TicketNumber(v) => self.content.ticket_number = v,
            FieldEdit::TicketType(v) => self.content.ticket_type = v,
            FieldEdit::Price(v) => self.content.price = v,
            FieldEdit::QrCode(v) => self.content.qr_code = v,
            FieldEdit::Category(v) => self.content.category = v,
            FieldEdit::Organizer(v) => self.content.organizer = v,
            FieldEdit::Logo(v) => self.content.logo = v,
            FieldEdit::PrimaryColor(v) => self.style.primary_color = v,
            FieldEdit::SecondaryColor(v) => self.style.secondary_color = v,
            FieldEdit::BackgroundColor(v) => self.style.background_color = v,
            FieldEdit::TextColor(v) => self.style.text_color = v,
            FieldEdit::FontFamily(v) => self.style.font_family = v,
            FieldEdit::FontSize(v) => {
                self.style.font_size = v.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
            }
            FieldEdit::BorderRadius(v) => {
                self.style.border_radius = v.clamp(BORDER_RADIUS_MIN, BORDER_RADIUS_MAX);
            }
            FieldEdit::Orientation(v) => self.style.orientation = v,
            FieldEdit::Format(v) => self.style.format = v,
        }
    }

    /// Flattens the session into the create payload, deriving the display
    /// name from the event name and template. Every content and style field
    /// is carried; a save can never send a partial design.
    pub fn to_payload(&self, owner: Option<Uuid>) -> NewTicketDesign {
        NewTicketDesign {
            name: format!("{} - {} Design", self.content.event_name, self.template_id),
            template_id: self.template_id.clone(),
            event_name: self.content.event_name.clone(),
            date: self.content.date.clone(),
            time: self.content.time.clone(),
            location: self.content.location.clone(),
            ticket_number: self.content.ticket_number.clone(),
            ticket_type: self.content.ticket_type.clone(),
            price: self.content.price.clone(),
            qr_code: self.content.qr_code.clone(),
            category: self.content.category.clone(),
            organizer: self.content.organizer.clone(),
            logo: Some(self.content.logo.clone()),
            primary_color: self.style.primary_color.clone(),
            secondary_color: self.style.secondary_color.clone(),
            background_color: self.style.background_color.clone(),
            text_color: self.style.text_color.clone(),
            font_family: self.style.font_family.clone(),
            font_size: self.style.font_size,
            border_radius: self.style.border_radius,
            orientation: self.style.orientation,
            format: self.style.format,
            user_id: owner,
        }
    }
}
