use draftcompare_core::{format_alsa, format_win_rate, Caliber, Metric, StatRecord};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::popup::PopupWidget;
use crate::theme::Theme;

/// Width and height of the overlay, as percentages of the screen
pub const DETAIL_SIZE: (u16, u16) = (60, 70);

/// Full-card overlay: image reference and aggregate stats for both calibers
pub fn detail_popup(name: &str, record: &StatRecord) -> PopupWidget<'static> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                record.png.clone().unwrap_or_default(),
                Style::default().fg(Theme::BRIGHT_TEXT),
            ),
        ]),
        Line::from(""),
    ];

    for caliber in Caliber::ALL {
        lines.push(Line::from(Span::styled(
            caliber.to_string(),
            Style::default()
                .fg(Theme::GOLD)
                .add_modifier(Modifier::BOLD),
        )));

        let Some(bundle) = record.bundle(caliber, "all") else {
            lines.push(Line::from(Span::styled(
                "  no data",
                Style::default().fg(Theme::DIM_TEXT),
            )));
            continue;
        };

        for metric in Metric::ALL {
            let line = match bundle.metric(metric) {
                Some(stats) => Line::from(vec![
                    Span::styled(
                        format!("  {:<4}", metric.prefix()),
                        Style::default().fg(Theme::MUTED_TEXT),
                    ),
                    Span::styled(
                        format!("{:>7} ", format_win_rate(stats.win_rate)),
                        Style::default().fg(Theme::BRIGHT_TEXT),
                    ),
                    Span::styled(
                        format!("{:<3}", stats.grade.label()),
                        Style::default()
                            .fg(Theme::grade_color(stats.grade))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" z {:+.2}", stats.z_score),
                        Style::default().fg(Theme::MUTED_TEXT),
                    ),
                ]),
                None => Line::from(Span::styled(
                    format!("  {:<4}   -", metric.prefix()),
                    Style::default().fg(Theme::DIM_TEXT),
                )),
            };
            lines.push(line);
        }

        lines.push(Line::from(Span::styled(
            format!(
                "  ALSA {}   # GIH {}",
                format_alsa(bundle.average_last_seen_at),
                bundle.number_seen_in_hand
            ),
            Style::default().fg(Theme::MUTED_TEXT),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "click or [Esc] to close",
        Style::default().fg(Theme::DIM_TEXT),
    )));

    PopupWidget::new(name).lines(lines).size(DETAIL_SIZE.0, DETAIL_SIZE.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftcompare_core::{Grade, MetricStats, PairStats, StatBundle};

    #[test]
    fn test_detail_lists_both_calibers() {
        let record = StatRecord {
            png: Some("opt.png".to_string()),
            all: vec![PairStats {
                key: "all".to_string(),
                bundle: StatBundle {
                    metrics: [
                        None,
                        Some(MetricStats {
                            win_rate: 0.58,
                            grade: Grade::B,
                            z_score: 0.7,
                        }),
                        None,
                    ],
                    average_last_seen_at: Some(4.0),
                    number_seen_in_hand: 99,
                },
            }],
            top: Vec::new(),
        };

        let popup = detail_popup("Opt", &record);
        let text: Vec<String> = popup.lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(popup.title, "Opt");
        assert_eq!(text[0], "Image: opt.png");
        assert!(text.iter().any(|l| l.contains("58.0%") && l.contains("B")));
        assert!(text.iter().any(|l| l.contains("ALSA 4.0") && l.contains("# GIH 99")));
        assert!(text.iter().any(|l| l.contains("no data")));
    }
}
