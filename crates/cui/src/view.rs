use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use sakura_core::{Phase, Suit};

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);
    match app.phase() {
        Phase::Revealing => draw_card(frame, root[1], app),
        Phase::Quizzing => draw_quiz(frame, root[1], app),
    }
    draw_music(frame, root[2], app);
    draw_events(frame, root[3], app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
    if app.answer_input.is_some() {
        draw_answer_prompt(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "{} | {}: {}",
        app.locale.text("🌸 Sakura Memory", "🌸 Sakura Memory: ทดสอบความจำไพ่"),
        app.locale.text("Hint", "คำแนะนำ"),
        app.next_hint()
    );
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(app.timer_lines().into_iter().map(Line::from));
    lines.push(Line::from(format!(
        "{}: {}",
        app.locale.text("Status", "สถานะ"),
        app.status_line
    )));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Overview", "ภาพรวม"));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_card(frame: &mut Frame, area: Rect, app: &App) {
    let round = app.session.round();
    let face = match round.current_card() {
        Some(card) => {
            let color = match card.suit {
                Suit::Hearts | Suit::Diamonds => Color::Red,
                Suit::Spades | Suit::Clubs => Color::White,
            };
            Span::styled(
                card.identifier(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        None => Span::raw("-"),
    };
    let lines = vec![
        Line::from(""),
        Line::from(face),
        Line::from(""),
        Line::from(format!(
            "{}  {}  {}",
            app.locale.text("⏪ previous", "⏪ ก่อนหน้า"),
            app.position_label(),
            app.locale.text("next ⏩", "ถัดไป ⏩")
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Deck", "สำรับไพ่"));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_quiz(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.quiz_rows();
    let items: Vec<ListItem<'_>> = rows.iter().map(|row| ListItem::new(row.clone())).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(app.locale.text(
            "📝 Memory quiz (enter = answer, c = check, r = restart)",
            "📝 ตอบคำถามความจำ (enter = ตอบ, c = ตรวจคำตอบ, r = เริ่มใหม่)",
        ));
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.quiz_cursor.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_music(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Music (m play/pause, s next)", "เพลง (m เล่น/หยุด, s เพลงถัดไป)"));
    frame.render_widget(
        Paragraph::new(Span::styled(
            app.music_line(),
            Style::default().fg(Color::Magenta),
        ))
        .block(block),
        area,
    );
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Events", "เหตุการณ์"));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "q quit | ? help | esc close",
            "q ออก | ? วิธีใช้ | esc ปิด",
        )),
        Line::from(app.locale.text(
            "→/l/n next card | ←/h/p previous card",
            "→/l/n ไพ่ใบถัดไป | ←/h/p ไพ่ใบก่อนหน้า",
        )),
        Line::from(app.locale.text(
            "↑/↓ pick question | enter type answer (e.g. 10h, AS, Q♦)",
            "↑/↓ เลือกคำถาม | enter พิมพ์คำตอบ (เช่น 10h, AS, Q♦)",
        )),
        Line::from(app.locale.text(
            "c check answers | r restart",
            "c ตรวจคำตอบ | r เริ่มใหม่",
        )),
        Line::from(app.locale.text(
            "m play/pause music | s or > next track",
            "m เล่น/หยุดเพลง | s หรือ > เพลงถัดไป",
        )),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "วิธีใช้"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_answer_prompt(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 28, frame.area());
    frame.render_widget(Clear, area);
    let position = app
        .session
        .round()
        .quiz_positions()
        .get(app.quiz_cursor)
        .map(|pos| pos + 1)
        .unwrap_or(0);
    let input = app.answer_input.as_deref().unwrap_or("");
    let lines = vec![
        Line::from(format!(
            "{} {} {}",
            app.locale.text("Card", "ไพ่ใบที่"),
            position,
            app.locale.text("was:", "คือ:")
        )),
        Line::from(app.locale.text(
            "Enter=save  Esc=cancel",
            "Enter=บันทึก  Esc=ยกเลิก",
        )),
        Line::from(""),
        Line::from(format!("> {input}")),
    ];
    let block = Block::default()
        .title(app.locale.text("Answer", "คำตอบ"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
