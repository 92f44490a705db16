/// Terminal rendering. Every crossterm draw call lives in this module.
///
/// The simulation works in world pixels (960×720 by default). Each frame
/// the world is squeezed into whatever terminal the player has, so every
/// draw goes through `Viewport::cell`. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use starfall::config::{GameConfig, GAME_TITLE};
use starfall::entities::{
    Boss, Enemy, EnemyVariant, EndReason, GameState, Minion, Mode, Powerup, PowerupKind,
    Projectile, ShotSource, Star,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_STAR: Color = Color::DarkGrey;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_BULLET_HEAVY: Color = Color::Red;
const C_BOSS: Color = Color::DarkMagenta;
const C_BOSS_MUTATED: Color = Color::Magenta;
const C_BOSS_ENRAGED: Color = Color::Red;
const C_BOSS_FLASH: Color = Color::White;
const C_MINION: Color = Color::DarkYellow;
const C_PARTICLE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BONUS_SPREAD: Color = Color::Yellow;
const C_BONUS_SHIELD: Color = Color::Cyan;
const C_BONUS_RAPID: Color = Color::Green;

/// Maps world pixels onto the bordered play area of the terminal.
/// Row 0 is the HUD, row 1 the top border, the last row the hint line.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(cfg: &GameConfig, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2).max(1);
        let inner_h = rows.saturating_sub(4).max(1);
        Viewport {
            cols,
            rows,
            sx: f32::from(inner_w) / cfg.width,
            sy: f32::from(inner_h) / cfg.height,
        }
    }

    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = 1 + (x * self.sx) as u16;
        let row = 2 + (y * self.sy) as u16;
        (col < self.cols.saturating_sub(1) && row < self.rows.saturating_sub(2)).then_some((col, row))
    }

    /// Width in cells of a world-space extent, never less than one.
    fn span(&self, w: f32) -> u16 {
        ((w * self.sx).round() as u16).max(1)
    }
}

fn put<W: Write>(out: &mut W, at: Option<(u16, u16)>, color: Color, text: &str) -> std::io::Result<()> {
    if let Some((col, row)) = at {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    stars: &[Star],
    cfg: &GameConfig,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cfg, cols, rows);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for star in stars {
        let glyph = if star.r > 1.6 { "+" } else { "." };
        put(out, view.cell(star.x, star.y), C_STAR, glyph)?;
    }
    draw_border(out, &view)?;
    draw_hud(out, state, cfg, &view)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, &view)?;
    }
    if let Some(boss) = &state.boss {
        draw_boss(out, boss, state.loop_time, &view)?;
    }
    for minion in &state.boss_minions {
        draw_minion(out, minion, &view)?;
    }
    for powerup in &state.powerups {
        draw_powerup(out, powerup, &view)?;
    }
    for bullet in state.bullets_player.iter().chain(&state.bullets_enemy) {
        draw_bullet(out, bullet, &view)?;
    }
    if let Some(fx) = &state.boss_defeat_fx {
        for p in &fx.particles {
            put(out, view.cell(p.x, p.y), C_PARTICLE, "*")?;
        }
    }
    if state.mode == Mode::Playing {
        draw_player(out, state, &view)?;
    }
    draw_controls_hint(out, state, &view)?;

    match state.mode {
        Mode::Start => draw_start_screen(out, &view)?,
        Mode::ContinuePrompt => draw_continue_prompt(out, state, &view)?,
        Mode::Reveal => draw_reveal(out, state, &view)?,
        Mode::End => draw_end_screen(out, state, &view)?,
        Mode::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = view.rows.saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
    for row in 2..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    cfg: &GameConfig,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}", state.score)))?;

    // Centre: wave counter, or the boss layer bar once it is up
    let (centre, centre_color) = match &state.boss {
        Some(boss) => {
            let layer = boss.active_layer();
            let filled = ((layer.hp / layer.max.max(1.0)) * 12.0).ceil() as usize;
            let tag = if boss.enraged {
                " ENRAGED"
            } else if boss.mutated {
                " MUTATED"
            } else {
                ""
            };
            (
                format!(
                    "BOSS {}/{} [{}{}]{}",
                    boss.current_layer + 1,
                    boss.layers.len(),
                    "█".repeat(filled.min(12)),
                    "·".repeat(12 - filled.min(12)),
                    tag
                ),
                if boss.enraged { C_BOSS_ENRAGED } else { C_BOSS_MUTATED },
            )
        }
        None => (
            format!("[ WAVE {}/{} ]", state.wave, cfg.total_waves),
            Color::Green,
        ),
    };
    let cx = (view.cols / 2).saturating_sub(centre.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(centre_color))?;
    out.queue(Print(&centre))?;

    // Right: active power-ups, shield, lives
    let p = &state.player;
    let mut tags = String::new();
    if p.rapid.active {
        tags.push_str(&format!("[RAPID{} {:>2.0}s] ", p.rapid.level, p.rapid.duration.ceil()));
    }
    if p.spread.active {
        tags.push_str(&format!("[SPREAD{} {:>2.0}s] ", p.spread.level, p.spread.duration.ceil()));
    }
    let shield = if p.shield_hits > 0 {
        format!("◆{} ", p.shield_hits)
    } else {
        String::new()
    };
    let lives = format!("Lives:{}", "♥".repeat(p.lives.max(0) as usize));
    let width = tags.chars().count() + shield.chars().count() + lives.chars().count();
    let rx = view.cols.saturating_sub(width as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&tags))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIELD))?;
    out.queue(Print(&shield))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let fx = &state.hit_fx;
    // Blink while the hit flicker runs
    if fx.flicker_timer > 0.0 && (state.loop_time * 30.0) as u32 % 2 == 0 {
        return Ok(());
    }
    let p = &state.player;
    let color = if fx.flash_timer > 0.0 { Color::Red } else { C_PLAYER };
    let shake = if fx.shake_timer > 0.0 { 4.0 } else { 0.0 };
    let x = p.x + shake * (state.loop_time * 90.0).sin();
    put(out, view.cell(x, p.y - p.h * 0.5), color, "▲")?;
    put(out, view.cell(x - p.w * 0.5, p.y), color, "/█\\")?;
    if p.shield_hits > 0 {
        put(out, view.cell(x - p.w * 0.7, p.y), C_HUD_SHIELD, "(")?;
        put(out, view.cell(x + p.w * 0.7, p.y), C_HUD_SHIELD, ")")?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = match enemy.variant {
        EnemyVariant::Scout => ("«▼»", Color::Green),
        EnemyVariant::Raider => ("(◎)", Color::Red),
        EnemyVariant::Striker => ("<╳>", Color::Yellow),
        EnemyVariant::Warden => ("[▣]", Color::Magenta),
    };
    put(out, view.cell(enemy.x - enemy.w * 0.5, enemy.y), color, glyph)
}

fn draw_boss<W: Write>(out: &mut W, boss: &Boss, loop_time: f32, view: &Viewport) -> std::io::Result<()> {
    let color = if boss.flash_timer > 0.0 {
        C_BOSS_FLASH
    } else if boss.enraged {
        C_BOSS_ENRAGED
    } else if boss.mutated || boss.is_evolving() {
        C_BOSS_MUTATED
    } else {
        C_BOSS
    };
    // Faint while it fades in during the entrance
    if boss.reveal_alpha < 0.35 && (loop_time * 12.0) as u32 % 3 != 0 {
        return Ok(());
    }
    let jitter = boss.shake_amount * (loop_time * 70.0).sin();
    let left = boss.x - boss.w * 0.5 + jitter;
    let top = boss.y - boss.h * 0.5;
    let cols = view.span(boss.w) as usize;
    let rows = ((boss.h * view.sy).round() as usize).max(2);
    let fill = if boss.shield_timer > 0.0 { "▓" } else { "█" };

    for r in 0..rows {
        let y = top + r as f32 / view.sy;
        let line = if r == 0 || r + 1 == rows {
            "▀".repeat(cols)
        } else {
            fill.repeat(cols)
        };
        put(out, view.cell(left.max(0.0), y), color, &line)?;
    }
    for p in &boss.particles {
        put(out, view.cell(p.x, p.y), C_PARTICLE, "·")?;
    }
    Ok(())
}

fn draw_minion<W: Write>(out: &mut W, minion: &Minion, view: &Viewport) -> std::io::Result<()> {
    put(out, view.cell(minion.x - minion.w * 0.5, minion.y), C_MINION, "<o>")
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Projectile, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = match bullet.source {
        ShotSource::Player => ("║", C_BULLET_PLAYER),
        ShotSource::BossLance | ShotSource::BossConstrictor => ("┃", C_BULLET_HEAVY),
        ShotSource::EnemyWave
        | ShotSource::BossSpread
        | ShotSource::BossAimed
        | ShotSource::BossMinion => ("↓", C_BULLET_ENEMY),
    };
    put(out, view.cell(bullet.x, bullet.y), color, glyph)
}

/// Falling power-ups:
///   !  rapid fire, ◆ shield, ★ spread shot
fn draw_powerup<W: Write>(out: &mut W, powerup: &Powerup, view: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = match powerup.kind {
        PowerupKind::RapidFire => ("!", C_BONUS_RAPID),
        PowerupKind::Shield => ("◆", C_BONUS_SHIELD),
        PowerupKind::SpreadShot => ("★", C_BONUS_SPREAD),
    };
    put(out, view.cell(powerup.x, powerup.y), color, glyph)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let hint = match state.mode {
        Mode::Start => "ENTER / SPACE : Start   Q : Quit",
        Mode::ContinuePrompt => "Y : Continue   N : Give up   Q : Quit",
        Mode::End => "R : Play again   Q : Quit",
        Mode::Playing | Mode::Reveal => "← → / A D : Move   SPACE : Shoot   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_panel<W: Write>(out: &mut W, view: &Viewport, lines: &[(String, Color)]) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }
    Ok(())
}

fn draw_start_screen<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    draw_panel(
        out,
        view,
        &[
            (format!("★  {}  ★", GAME_TITLE.to_uppercase()), Color::Cyan),
            (String::new(), Color::White),
            ("Clear the waves, then break the boss layer by layer.".into(), Color::White),
            ("!  rapid fire   ◆  shield   ★  spread shot".into(), Color::DarkGrey),
            (String::new(), Color::White),
            ("Press ENTER to launch".into(), Color::Yellow),
        ],
    )
}

fn draw_continue_prompt<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    draw_panel(
        out,
        view,
        &[
            ("╔════════════════════╗".into(), Color::Red),
            ("║     CONTINUE?      ║".into(), Color::Red),
            ("╚════════════════════╝".into(), Color::Red),
            (format!("{:>2}", state.continue_timer.ceil() as u32), Color::Yellow),
            ("Y - Retry this phase   N - Give up".into(), Color::White),
        ],
    )
}

fn draw_reveal<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let Some(clue) = &state.revealed_clue else {
        return Ok(());
    };
    draw_panel(
        out,
        view,
        &[
            ("The core is silent. Its last word:".into(), Color::DarkGrey),
            (clue.to_uppercase(), Color::Yellow),
        ],
    )
}

fn draw_end_screen<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let (banner, color) = match state.end_reason {
        Some(EndReason::Win) => ("║     VICTORY        ║", Color::Green),
        _ => ("║    GAME  OVER      ║", Color::Red),
    };
    let mut lines = vec![
        ("╔════════════════════╗".to_string(), color),
        (banner.to_string(), color),
        ("╚════════════════════╝".to_string(), color),
        (format!("Final Score: {:>6}", state.score), Color::Yellow),
    ];
    if let Some(clue) = &state.revealed_clue {
        lines.push((format!("Clue: {clue}"), Color::Cyan));
    }
    lines.push(("R - Play Again  Q - Quit".to_string(), Color::White));
    draw_panel(out, view, &lines)
}
