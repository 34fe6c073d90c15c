use crate::core::intensity::Color;

const DAMAGE_NONE: Color = Color::new("cyan");
const DAMAGE_SLIGHT: Color = Color::new("#008000");
const DAMAGE_MODERATE: Color = Color::new("#ffa500");
const DAMAGE_SEVERE: Color = Color::new("#ff0000");

/// Marker color for a building damage level; 3 and above are all "severe".
pub fn color_for_damage(level: u32) -> Color {
    match level {
        0 => DAMAGE_NONE,
        1 => DAMAGE_SLIGHT,
        2 => DAMAGE_MODERATE,
        _ => DAMAGE_SEVERE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_colors() {
        assert_eq!(color_for_damage(0).as_str(), "cyan");
        assert_eq!(color_for_damage(1).as_str(), "#008000");
        assert_eq!(color_for_damage(2).as_str(), "#ffa500");
        assert_eq!(color_for_damage(3).as_str(), "#ff0000");
    }

    #[test]
    fn test_severe_clamps() {
        assert_eq!(color_for_damage(3), color_for_damage(100));
        assert_eq!(color_for_damage(3), color_for_damage(u32::MAX));
    }
}
