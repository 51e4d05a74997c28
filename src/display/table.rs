use crate::api::models::{Listing, ListingImage, Profile};
use crate::core::services::types::ListingStats;
use crate::display::format::{format_optional_date, format_price};
use crate::utils::text::truncate_text_unicode;
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;

const TITLE_COLUMN_WIDTH: usize = 40;

/// Formatter and utilities for table display
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    /// Create a new TableDisplay instance
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Detect terminal width
    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _rows)) => {
                let width = cols as usize;
                // Set minimum and maximum width for improved stability
                if width < 40 {
                    Some(40)
                } else if width > 200 {
                    Some(200)
                } else {
                    Some(width)
                }
            }
            Err(_) => Some(80), // Default width
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn status_cell(&self, activo: bool) -> Cell {
        let cell = if activo {
            Cell::new("Activo")
        } else {
            Cell::new("Inactivo")
        };
        if self.use_colors {
            if activo {
                cell.fg(Color::Green)
            } else {
                cell.fg(Color::DarkGrey)
            }
        } else {
            cell
        }
    }

    /// Render the caller's listings as a table
    pub fn render_listings(&self, listings: &[Listing]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }

        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Título").add_attribute(Attribute::Bold),
            Cell::new("Operación").add_attribute(Attribute::Bold),
            Cell::new("Inmueble").add_attribute(Attribute::Bold),
            Cell::new("Precio").add_attribute(Attribute::Bold),
            Cell::new("Ciudad").add_attribute(Attribute::Bold),
            Cell::new("Estado").add_attribute(Attribute::Bold),
            Cell::new("Imágenes").add_attribute(Attribute::Bold),
            Cell::new("Publicado").add_attribute(Attribute::Bold),
        ]);

        for listing in listings {
            table.add_row(vec![
                Cell::new(&listing.id),
                Cell::new(truncate_text_unicode(&listing.titulo, TITLE_COLUMN_WIDTH)),
                Cell::new(&listing.tipo_operacion),
                Cell::new(&listing.tipo_inmueble),
                Cell::new(format_price(listing.precio)),
                Cell::new(&listing.ciudad),
                self.status_cell(listing.activo),
                Cell::new(listing.imagenes.len().to_string()),
                Cell::new(format_optional_date(listing.created_at)),
            ]);
        }

        table.to_string()
    }

    /// Render a listing's images in display order, cover flagged
    pub fn render_images(&self, images: &[ListingImage]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);

        table.set_header(vec![
            Cell::new("Orden").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("URL").add_attribute(Attribute::Bold),
            Cell::new("").add_attribute(Attribute::Bold),
        ]);

        let cover_id = images
            .iter()
            .find(|img| img.orden == 1)
            .or_else(|| images.first())
            .map(|img| img.id.clone());

        for image in images {
            let cover_marker = if Some(&image.id) == cover_id.as_ref() {
                "Principal"
            } else {
                ""
            };
            table.add_row(vec![
                Cell::new(image.orden.to_string()),
                Cell::new(&image.id),
                Cell::new(&image.url),
                Cell::new(cover_marker),
            ]);
        }

        table.to_string()
    }

    /// Render the profile card
    pub fn render_profile(&self, profile: &Profile, email: Option<&str>) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);

        let value = |v: &Option<String>| v.clone().unwrap_or_else(|| "No especificado".to_string());

        table.add_row(vec![Cell::new("Email"), Cell::new(email.unwrap_or("—"))]);
        table.add_row(vec![Cell::new("Nombre"), Cell::new(value(&profile.nombre))]);
        table.add_row(vec![
            Cell::new("Apellido"),
            Cell::new(value(&profile.apellido)),
        ]);
        table.add_row(vec![Cell::new("Bio"), Cell::new(value(&profile.bio))]);
        table.add_row(vec![Cell::new("País"), Cell::new(value(&profile.country))]);
        // Without an avatar the app falls back to an initials badge
        table.add_row(vec![
            Cell::new("Avatar"),
            Cell::new(
                profile
                    .avatar_url
                    .clone()
                    .unwrap_or_else(|| format!("({})", profile.initials())),
            ),
        ]);

        table.to_string()
    }
}

/// One-line dashboard summary of the listing stats cards
pub fn render_stats(stats: &ListingStats) -> String {
    format!(
        "Total: {} | Activos: {} | Inactivos: {} | Este mes: {}",
        stats.total, stats.active, stats.inactive, stats.created_this_month
    )
}
