//! Full-script output tests
//!
//! Converts small batches end to end and compares the complete text.

use danmaku_core::{
    render::StyleId, CommentBuilder, Converter, Placement, Rgb, StageConfig,
};

const DEFAULT_HEADER: &str = "\
[Script Info]
; Script generated by danmaku-rs
ScriptType: v4.00+
PlayResX: 683
PlayResY: 384
Aspect Ratio: 683:384
Collisions: Normal
WrapStyle: 2
ScaledBorderAndShadow: yes
YCbCr Matrix: TV.601

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Danmaku2ASS_00ab, sans-serif, 25, &H00FFFFFF, &H00FFFFFF, &H00000000, &H00000000, 0, 0, 0, 0, 100, 100, 0.00, 0.00, 1, 1, 0, 7, 0, 0, 0, 0
Style: Danmaku2ASS_00ab_AA, SimHei, 10, &H00FFFFFF, &H00FFFFFF, &H00000000, &H00000000, 0, 0, 0, 0, 100, 100, 0.00, 0.00, 1, 1, 0, 7, 0, 0, 0, 0

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// One comment of each visual flavour, written in timeline order
    #[test]
    fn test_mixed_batch_script() {
        let comments = vec![
            CommentBuilder::new("big black")
                .timeline(2.0)
                .sequence(3)
                .placement(Placement::Top)
                .font_size(36.0)
                .color(Rgb::BLACK)
                .build()
                .unwrap(),
            CommentBuilder::new("hello")
                .timeline(0.5)
                .sequence(1)
                .build()
                .unwrap(),
            CommentBuilder::new("{bottom}")
                .timeline(1.0)
                .sequence(2)
                .placement(Placement::Bottom)
                .color(Rgb::new(0xFF_0000))
                .build()
                .unwrap(),
        ];

        let mut script = String::new();
        let report = Converter::new(StageConfig::default())
            .with_style_id(StyleId::from_seed(0xab))
            .convert(&comments, &mut script)
            .unwrap();

        let expected = format!(
            "{DEFAULT_HEADER}\
Dialogue: 2,0:00:00.50,0:00:05.50,Danmaku2ASS_00ab,,0000,0000,0000,,{{\\move(683, 0, -125, 0)}}hello
Dialogue: 2,0:00:01.00,0:00:06.00,Danmaku2ASS_00ab,,0000,0000,0000,,{{\\an2\\pos(341, 384)\\c&H0200E9&}}\\{{bottom\\}}
Dialogue: 2,0:00:02.00,0:00:07.00,Danmaku2ASS_00ab,,0000,0000,0000,,{{\\an8\\pos(341, 0)\\fs36\\c&H000000&\\3c&HFFFFFF&}}big black
"
        );
        assert_eq!(script, expected);
        assert_eq!(report.placed, 3);
    }

    /// Pictorial art keeps its lines ten rows apart under the art style
    #[test]
    fn test_pictorial_script() {
        let art = CommentBuilder::new("##\n ##")
            .timeline(1.0)
            .font_size(10.0)
            .pictorial(true)
            .build()
            .unwrap();

        let mut script = String::new();
        let report = Converter::new(StageConfig::default())
            .with_style_id(StyleId::from_seed(0xab))
            .convert(&[art], &mut script)
            .unwrap();

        let events = script.strip_prefix(DEFAULT_HEADER).unwrap();
        assert_eq!(
            events,
            "Dialogue: 2,0:00:01.00,0:00:06.00,Danmaku2ASS_00ab_AA,,0000,0000,0000,,{\\move(683, 0, -30, 0)}##\n\
             Dialogue: 2,0:00:01.00,0:00:06.00,Danmaku2ASS_00ab_AA,,0000,0000,0000,,{\\move(683, 10, -30, 10)}\u{2007}##\n"
        );
        assert_eq!(report.pictorial, 1);
    }

    /// Colours go through BT.709 conversion on every stage size
    #[test]
    fn test_hd_stage_converts_colours() {
        let comment = CommentBuilder::new("red")
            .color(Rgb::new(0xFF_0000))
            .build()
            .unwrap();
        let mut script = String::new();
        Converter::new(StageConfig::default().with_stage(1920, 1080))
            .with_style_id(StyleId::from_seed(1))
            .convert(&[comment], &mut script)
            .unwrap();
        assert!(script.contains("\\c&H0200E9&}red\n"));
    }

    /// Niconico XML in, script out
    #[cfg(feature = "niconico")]
    #[test]
    fn test_niconico_document_end_to_end() {
        use danmaku_core::parser::niconico::read_files;

        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<packet>
  <chat thread="1" no="2" vpos="300" date="1400000002" mail="shita">later</chat>
  <chat thread="1" no="1" vpos="100" date="1400000001" mail="ue pink">earlier</chat>
  <chat thread="1" no="3" vpos="200" date="1400000003">/ad</chat>
  <chat thread="1" no="4" date="1400000004">no vpos</chat>
</packet>"#;
        let outcome = read_files([xml], 25.0).unwrap();
        assert_eq!(outcome.issues.len(), 1);

        let mut script = String::new();
        let report = Converter::new(StageConfig::default())
            .with_style_id(StyleId::from_seed(0xab))
            .convert(&outcome.comments, &mut script)
            .unwrap();
        assert_eq!(report.total, 2);

        let events: Vec<&str> = script
            .lines()
            .filter(|line| line.starts_with("Dialogue:"))
            .collect();
        assert_eq!(
            events,
            vec![
                "Dialogue: 2,0:00:01.00,0:00:06.00,Danmaku2ASS_00ab,,0000,0000,0000,,{\\an8\\pos(341, 0)\\c&H8173F4&}earlier",
                "Dialogue: 2,0:00:03.00,0:00:08.00,Danmaku2ASS_00ab,,0000,0000,0000,,{\\an2\\pos(341, 384)}later",
            ]
        );
    }
}
