//! Drawing of the individual pieces of a frame.

use super::{Canvas, ColorClass};
use crate::{
    action::Action,
    config::KeyBindings,
    constants::{BIKE_CHAR, MAX_HITS, PATH_CHAR},
    game::{enemy::EnemyPool, Bike, Field},
};

/// Boundary markers on both sides of the path, from the top edge down to the row above the status line.
pub fn draw_path<C: Canvas>(canvas: &mut C, field: &Field) {
    for line in field.top_edge()..field.bottom() {
        canvas.put(field.side_edge(), line, PATH_CHAR, ColorClass::Path);
        canvas.put(field.right_edge(), line, PATH_CHAR, ColorClass::Path);
    }
}

pub fn draw_enemies<C: Canvas>(canvas: &mut C, enemies: &EnemyPool) {
    for enemy in enemies.iter() {
        canvas.put(enemy.x, enemy.y, enemy.glyph.symbol(), enemy.glyph.color());
    }
}

pub fn draw_bike<C: Canvas>(canvas: &mut C, bike: &Bike) {
    canvas.put(bike.x, bike.y, BIKE_CHAR, ColorClass::Bike);
}

/// Remaining lives stacked up the left side, position and hit count on the bottom line.
pub fn draw_status<C: Canvas>(canvas: &mut C, field: &Field, bike: &Bike) {
    for i in 0..MAX_HITS.saturating_sub(bike.hits) as i32 {
        canvas.put(3, field.lines - 3 - (i << 1), BIKE_CHAR, ColorClass::Status);
    }
    canvas.put_str(0, field.bottom(), &format!("Pos: {:02} - Hits: {}", bike.x, bike.hits), ColorClass::Status);
}

fn centered<C: Canvas>(canvas: &mut C, y: i32, text: &str) {
    let (cols, _) = canvas.size();
    let x = (cols as i32 - text.chars().count() as i32) / 2;
    canvas.put_str(x.max(0), y, text, ColorClass::Default);
}

pub fn draw_title<C: Canvas>(canvas: &mut C, keys: &KeyBindings) {
    let (_, lines) = canvas.size();
    let top = lines as i32 / 2 - 5;
    let text = [
        format!("<< BIKE {}.{} >>", env!("CARGO_PKG_VERSION_MAJOR"), env!("CARGO_PKG_VERSION_MINOR")),
        String::new(),
        "Objective: Ride your bike down the hill without".to_string(),
        format!("hitting more than {MAX_HITS} obstacles."),
        format!("Your bike is the little '{BIKE_CHAR}' at the bottom of the screen."),
        format!("Use {} to move left.", keys.describe(Action::Left)),
        format!("Use {} to move right.", keys.describe(Action::Right)),
        format!("Hit {} to begin!", keys.describe(Action::Start)),
        format!("Press {} to quit while in the game.", keys.describe(Action::Quit)),
    ];
    for (i, line) in text.iter().enumerate() {
        centered(canvas, top + i as i32, line);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::Config, game::enemy::Glyph, ui::memory::MemoryCanvas};

    #[test]
    fn path_spans_the_top_edge_to_the_status_line() {
        let field = Field::from((40, 30));
        let mut canvas = MemoryCanvas::new(40, 30);
        draw_path(&mut canvas, &field);

        assert_eq!(canvas.find('|').len(), 2 * (30 - 1 - 5));
        assert_eq!(canvas.cell(5, 5), ('|', ColorClass::Path));
        assert_eq!(canvas.cell(35, 28), ('|', ColorClass::Path));
        assert_eq!(canvas.cell(5, 29).0, ' ');
    }

    #[test]
    fn enemies_are_drawn_with_their_color() {
        let mut pool = EnemyPool::new(3);
        pool.place(10, 2, Glyph::Block);
        pool.place(11, 2, Glyph::Ball);
        let mut canvas = MemoryCanvas::new(20, 5);
        draw_enemies(&mut canvas, &pool);

        assert_eq!(canvas.cell(10, 2), ('#', ColorClass::Enemy2));
        assert_eq!(canvas.cell(11, 2), ('o', ColorClass::Enemy1));
        assert_eq!(canvas.row(2).trim(), "#o");
    }

    #[test]
    fn status_shows_lives_left() {
        let field = Field::from((80, 30));
        let bike = Bike { x: 7, y: 28, hits: 3 };
        let mut canvas = MemoryCanvas::new(80, 30);
        draw_status(&mut canvas, &field, &bike);

        assert_eq!(canvas.find(BIKE_CHAR), vec![(3, 25), (3, 27)]);
        assert!(canvas.row(29).starts_with("Pos: 07 - Hits: 3"));
        assert_eq!(canvas.cell(0, 29).1, ColorClass::Status);
    }

    #[test]
    fn title_lists_the_controls() -> color_eyre::eyre::Result<()> {
        let config = Config::defaults()?;
        let mut canvas = MemoryCanvas::new(80, 24);
        draw_title(&mut canvas, &config.keybindings);

        let screen: Vec<String> = (0..24).map(|y| canvas.row(y).trim().to_string()).collect();
        assert!(screen.contains(&"<< BIKE 1.1 >>".to_string()));
        assert!(screen.contains(&"Use Left, 'j', 'h' to move left.".to_string()));
        assert!(screen.contains(&"Use Right, 'k', 'l' to move right.".to_string()));
        assert!(screen.contains(&"Hit Space to begin!".to_string()));
        Ok(())
    }
}
