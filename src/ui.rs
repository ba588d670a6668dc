//! Layout and drawing: board, next pair, phase line, pause and game-over overlays.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use wordtrix::{CellView, Letter, Phase, Snapshot};

use crate::theme::Theme;

/// Each tile is drawn as " X ".
const CELL_WIDTH: u16 = 3;
const CELL_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 24;

/// Terminal cells spanned by `cells` board cells of `cell` size plus the border.
/// Saturates instead of wrapping.
fn span(cells: usize, cell: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell)
        .saturating_add(2)
}

/// Board size in terminal cells, border included.
fn board_outer_size(snapshot: &Snapshot) -> (u16, u16) {
    (
        span(snapshot.width, CELL_WIDTH),
        span(snapshot.height, CELL_HEIGHT),
    )
}

/// Smallest terminal (columns, rows) that fits a board of the given size.
pub fn required_terminal_size(width: usize, height: usize) -> (u16, u16) {
    let w = span(width, CELL_WIDTH).saturating_add(SIDEBAR_WIDTH);
    let h = span(height, CELL_HEIGHT).max(SIDEBAR_HEIGHT);
    (w, h)
}

const SIDEBAR_HEIGHT: u16 = 18;

pub fn draw(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme) {
    let area = frame.area();
    let (bw, bh) = board_outer_size(snapshot);
    let total_w = bw.saturating_add(SIDEBAR_WIDTH);
    let total_h = bh.max(SIDEBAR_HEIGHT);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_h),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);

    let board_area = Rect {
        height: bh.min(columns[0].height),
        ..columns[0]
    };
    draw_board(frame, snapshot, theme, board_area);
    draw_sidebar(frame, snapshot, theme, columns[1]);

    if snapshot.is_game_over() {
        draw_game_over(frame, theme, board_area);
    } else if snapshot.paused {
        draw_pause_overlay(frame, theme, board_area);
    }
}

fn draw_board(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Wordtrix ", Style::default().fg(theme.title).bold()));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for y in 0..snapshot.height {
        let ry = inner.y.saturating_add((y as u16).saturating_mul(CELL_HEIGHT));
        if ry >= inner.bottom() {
            break;
        }
        for x in 0..snapshot.width {
            let rx = inner.x.saturating_add((x as u16).saturating_mul(CELL_WIDTH));
            if rx.saturating_add(CELL_WIDTH) > inner.right() {
                break;
            }
            let (text, style) = match snapshot.cell(x, y) {
                CellView::Empty => ("   ".to_string(), Style::default().bg(theme.bg)),
                CellView::Falling(t) => (format!(" {} ", t.letter), theme.piece.style().bold()),
                CellView::Settled(t) if t.marked => {
                    (format!(" {} ", t.letter), theme.marked.style().bold())
                }
                CellView::Settled(t) if t.greyed => (format!(" {} ", t.letter), theme.greyed.style()),
                CellView::Settled(t) => (format!(" {} ", t.letter), theme.tile.style()),
            };
            buf.set_string(rx, ry, text, style);
        }
    }
}

fn draw_sidebar(frame: &mut Frame, snapshot: &Snapshot, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Next
            Constraint::Length(3), // Phase
            Constraint::Length(11), // Controls
        ])
        .split(area);

    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Next ", title_style));
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    let next = Line::from(
        snapshot
            .next
            .iter()
            .map(|&l: &Letter| Span::styled(format!(" {l} "), theme.piece.style().bold()))
            .collect::<Vec<_>>(),
    );
    Paragraph::new(vec![Line::from(""), next])
        .alignment(Alignment::Center)
        .render(next_inner, frame.buffer_mut());

    let phase_label = if snapshot.paused {
        "Paused"
    } else {
        snapshot.phase.label()
    };
    let phase_style = match snapshot.phase {
        Phase::Clearing => Style::default().fg(theme.marked.bg).bold(),
        Phase::GameOver => Style::default().fg(ratatui::style::Color::Red).bold(),
        _ => fg_style,
    };
    Paragraph::new(Line::from(Span::styled(phase_label, phase_style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Phase ", title_style)),
        )
        .render(chunks[1], frame.buffer_mut());

    let help = [
        ("←/→ a/d", "Move"),
        ("↓ s", "Drop"),
        ("↑ w", "Flip"),
        ("k / j", "Rotate"),
        ("Space", "Set in place"),
        ("p", "Pause"),
        ("r", "Restart"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line> = help
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<9}"), title_style),
                Span::styled(*what, fg_style),
            ])
        })
        .collect();
    Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Controls ", title_style)),
        )
        .render(chunks[2], frame.buffer_mut());
}

/// Rect of `w`x`h` centred in `area`.
fn centered(area: Rect, w: u16, h: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = centered(area, 24, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(ratatui::style::Color::Black).bg(ratatui::style::Color::Yellow),
        )),
        Line::from(Span::styled("P: Resume  Q: Quit", Style::default().fg(theme.main_fg))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}

fn draw_game_over(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = centered(area, 24, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Game Over ",
            Style::default().fg(ratatui::style::Color::White).bg(ratatui::style::Color::Red),
        )),
        Line::from(Span::styled("R: Restart  Q: Quit", Style::default().fg(theme.main_fg))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}
