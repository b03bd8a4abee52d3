//! Parser for the .osu text format, versions 3 through 14.
//!
//! The field layout changed silently across format revisions; every
//! version gate below is keyed off the integer in the header line.
//! Malformed timing-point and hit-object lines are skipped rather than
//! treated as fatal, since real-world files spanning a decade of
//! revisions are full of noise. Missing required fields and unknown
//! object/slider types are fatal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::object::{CurveKind, CurvePoint, CurvePointKind, HitKind, HitObject};
use super::timing::{Difficulty, TimingPoint};
use super::{Beatmap, GameMode};
use crate::error::{Error, Result};

const VERSION_PREFIX: &str = "osu file format v";

/// Offset correction for v3/v4 files; every time field is shifted.
const EARLY_VERSION_TIME_SHIFT: i32 = 24;

pub(super) fn parse_path(path: &Path) -> Result<Beatmap> {
    let bytes = fs::read(path)
        .map_err(|_| Error::FileMissingOrEmpty(path.display().to_string()))?;
    if bytes.is_empty() {
        return Err(Error::FileMissingOrEmpty(path.display().to_string()));
    }
    parse_bytes(&bytes)
}

pub(super) fn parse_bytes(bytes: &[u8]) -> Result<Beatmap> {
    if bytes.is_empty() {
        return Err(Error::FileMissingOrEmpty("<bytes>".to_string()));
    }

    // The identity replays reference: MD5 over the raw file bytes.
    let hash = format!("{:x}", md5::compute(bytes));

    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let format_version = parse_version(lines.next().unwrap_or(""))?;
    if format_version < 3 {
        return Err(Error::UnsupportedFormat(format!(
            "format version v{} is not supported",
            format_version
        )));
    }

    let sections = collect_sections(lines);

    let general = key_values(sections.get("General").map(Vec::as_slice).unwrap_or(&[]));
    let metadata = key_values(sections.get("Metadata").map(Vec::as_slice).unwrap_or(&[]));
    let difficulty_kv =
        key_values(sections.get("Difficulty").map(Vec::as_slice).unwrap_or(&[]));

    let mode = match general.get("Mode") {
        Some(raw) => {
            let value = raw.parse::<u8>().ok().and_then(GameMode::from_u8);
            value.ok_or_else(|| Error::malformed("General", format!("unknown mode {raw:?}")))?
        }
        None => GameMode::Standard,
    };
    let stack_leniency = match general.get("StackLeniency") {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::malformed("General", "unparsable StackLeniency"))?,
        None => 0.7,
    };

    let title = require(&metadata, "Metadata", "Title")?.to_string();
    let artist = require(&metadata, "Metadata", "Artist")?.to_string();
    let creator = require(&metadata, "Metadata", "Creator")?.to_string();
    let version = require(&metadata, "Metadata", "Version")?.to_string();
    let beatmap_id = metadata.get("BeatmapID").cloned();
    let set_id = metadata.get("BeatmapSetID").cloned();

    let difficulty = parse_difficulty(&difficulty_kv)?;

    let timing_points = parse_timing_points(
        sections.get("TimingPoints").map(Vec::as_slice).unwrap_or(&[]),
        format_version,
    );

    let mut hit_objects = Vec::new();
    for line in sections.get("HitObjects").map(Vec::as_slice).unwrap_or(&[]) {
        match parse_hit_object(line, format_version, difficulty, &timing_points)? {
            Some(object) => hit_objects.push(object),
            None => debug!("skipping malformed hit object line: {line}"),
        }
    }

    Ok(Beatmap {
        format_version,
        hash,
        mode,
        stack_leniency,
        title,
        artist,
        creator,
        version,
        beatmap_id,
        set_id,
        difficulty,
        timing_points,
        hit_objects,
    })
}

fn parse_version(header: &str) -> Result<i32> {
    let rest = header
        .strip_prefix(VERSION_PREFIX)
        .ok_or_else(|| Error::UnsupportedFormat("unknown .osu file header".to_string()))?;
    rest.parse()
        .map_err(|_| Error::UnsupportedFormat(format!("bad version number {rest:?}")))
}

/// Group lines under their bracket-delimited section headers.
/// Unrecognized sections are collected too and simply never read.
fn collect_sections<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, Vec<String>> {
    let mut sections: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in lines {
        if line.starts_with('[') && line.ends_with(']') {
            let name = line[1..line.len() - 1].to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
        } else if let Some(name) = &current {
            sections.entry(name.clone()).or_default().push(line.to_string());
        }
    }

    sections
}

/// Colon-delimited key/value lines. Only the first colon splits, and
/// only a single leading space after it is trimmed from the value.
fn key_values(lines: &[String]) -> HashMap<String, String> {
    let mut kv = HashMap::new();
    for line in lines {
        if let Some((key, value)) = line.split_once(':') {
            let value = value.strip_prefix(' ').unwrap_or(value);
            kv.insert(key.to_string(), value.to_string());
        }
    }
    kv
}

fn require<'a>(kv: &'a HashMap<String, String>, section: &str, key: &str) -> Result<&'a str> {
    kv.get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::malformed(section, format!("missing required field {key}")))
}

fn parse_difficulty(kv: &HashMap<String, String>) -> Result<Difficulty> {
    fn field<T: std::str::FromStr>(kv: &HashMap<String, String>, key: &str) -> Result<T> {
        require(kv, "Difficulty", key)?
            .parse()
            .map_err(|_| Error::malformed("Difficulty", format!("unparsable field {key}")))
    }

    let hp = field(kv, "HPDrainRate")?;
    let cs = field(kv, "CircleSize")?;
    let od: f32 = field(kv, "OverallDifficulty")?;
    // AR did not exist before the AR/OD split; old files reuse OD.
    let ar = match kv.get("ApproachRate") {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::malformed("Difficulty", "unparsable field ApproachRate"))?,
        None => od,
    };
    let slider_multiplier = field(kv, "SliderMultiplier")?;
    let slider_tick_rate = field(kv, "SliderTickRate")?;

    Ok(Difficulty {
        hp,
        cs,
        od,
        ar,
        slider_multiplier,
        slider_tick_rate,
    })
}

/// The beat duration of inherited points comes from the last
/// non-inherited point seen, threaded through as `last_ms_per_beat`.
fn parse_timing_points(lines: &[String], format_version: i32) -> Vec<TimingPoint> {
    let mut points = Vec::new();
    let mut last_ms_per_beat = 0.0;

    for line in lines {
        match parse_timing_point(line, last_ms_per_beat, format_version) {
            Some(point) => {
                if !point.inherited {
                    last_ms_per_beat = point.ms_per_beat;
                }
                points.push(point);
            }
            None => debug!("skipping malformed timing point line: {line}"),
        }
    }

    points
}

fn parse_timing_point(
    line: &str,
    last_ms_per_beat: f64,
    format_version: i32,
) -> Option<TimingPoint> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 2 {
        return None;
    }

    let mut offset: f64 = parts[0].parse().ok()?;

    // Prior to v4, beats per measure was always 4.
    let beats_per_measure = if format_version <= 3 {
        4
    } else {
        parts.get(2)?.parse().ok()?
    };

    // Prior to v6 inherited points did not exist. From v6 on, field 7
    // holds "1" for non-inherited and "0" for inherited.
    let inherited = if format_version <= 5 {
        false
    } else {
        *parts.get(6)? == "0"
    };

    let raw_ms_per_beat: f64 = parts[1].parse().ok()?;
    let (ms_per_beat, slider_velocity) = if inherited {
        // Negative raw value encodes the velocity multiplier.
        (last_ms_per_beat, -100.0 / raw_ms_per_beat)
    } else {
        (raw_ms_per_beat, 1.0)
    };

    if format_version <= 4 {
        offset += EARLY_VERSION_TIME_SHIFT as f64;
    }

    Some(TimingPoint {
        offset,
        ms_per_beat,
        beats_per_measure,
        inherited,
        slider_velocity,
    })
}

fn parse_hit_object(
    line: &str,
    format_version: i32,
    difficulty: Difficulty,
    timing_points: &[TimingPoint],
) -> Result<Option<HitObject>> {
    // Empty entries are dropped because v3/v4 circles carry a trailing
    // comma that would otherwise read as an additions field.
    let parts: Vec<&str> = line.split(',').filter(|p| !p.is_empty()).collect();
    if parts.len() < 5 {
        return Ok(None);
    }

    let Ok(type_field) = parts[3].parse::<i32>() else {
        return Ok(None);
    };

    let object = if type_field & 1 == 1 {
        parse_circle(&parts, difficulty)
    } else if type_field & 2 == 2 {
        parse_slider(&parts, format_version, difficulty)?
    } else if type_field & 8 == 8 {
        parse_spinner(&parts, format_version, difficulty)
    } else {
        return Err(Error::UnknownObjectType(type_field));
    };

    let Some(mut object) = object else {
        return Ok(None);
    };

    if type_field & 4 == 4 {
        object.new_combo = true;
    }

    if format_version <= 4 {
        object.time += EARLY_VERSION_TIME_SHIFT;
    }

    if let HitKind::Slider {
        repeat,
        pixel_length,
        end_time,
        ..
    } = &mut object.kind
    {
        *end_time = slider_end_time(
            object.time,
            *repeat,
            *pixel_length,
            &difficulty,
            timing_points,
        );
    }

    Ok(Some(object))
}

// Format: x,y,time,type,hitSound,addition
fn parse_circle(parts: &[&str], difficulty: Difficulty) -> Option<HitObject> {
    Some(HitObject {
        x: parts[0].parse().ok()?,
        y: parts[1].parse().ok()?,
        time: parts[2].parse().ok()?,
        new_combo: false,
        difficulty,
        kind: HitKind::Circle,
    })
}

// Format: x,y,time,type,hitSound,sliderType|curvePoints,repeat,pixelLength,...
fn parse_slider(
    parts: &[&str],
    format_version: i32,
    difficulty: Difficulty,
) -> Result<Option<HitObject>> {
    if parts.len() < 8 {
        return Ok(None);
    }

    let shape_parts: Vec<&str> = parts[5].split('|').collect();
    let curve = match shape_parts[0] {
        "L" => CurveKind::Linear,
        "P" => CurveKind::Perfect,
        "B" => CurveKind::Bezier,
        "C" => CurveKind::Catmull,
        other => return Err(Error::UnknownSliderType(other.to_string())),
    };

    // Index 0 is the type letter. v3/v4 sliders duplicate the head
    // position as the first curve point; skip it so every version
    // yields the same point list.
    let first_point_index = if format_version <= 4 { 2 } else { 1 };

    let mut curve_points = Vec::new();
    let mut i = first_point_index;
    while i < shape_parts.len() {
        let Some((raw_x, raw_y)) = shape_parts[i].split_once(':') else {
            return Ok(None);
        };
        let (Ok(x), Ok(y)) = (raw_x.parse(), raw_y.parse()) else {
            return Ok(None);
        };

        // A point equal to its successor marks a segment boundary
        // ("red" point); the duplicate is consumed without emitting a
        // second point.
        let kind = if i + 1 < shape_parts.len() && shape_parts[i] == shape_parts[i + 1] {
            i += 1;
            CurvePointKind::Red
        } else {
            CurvePointKind::Grey
        };

        curve_points.push(CurvePoint { x, y, kind });
        i += 1;
    }

    let (Ok(repeat), Ok(pixel_length)) = (parts[6].parse(), parts[7].parse()) else {
        return Ok(None);
    };

    Ok(Some(HitObject {
        x: match parts[0].parse() {
            Ok(v) => v,
            Err(_) => return Ok(None),
        },
        y: match parts[1].parse() {
            Ok(v) => v,
            Err(_) => return Ok(None),
        },
        time: match parts[2].parse() {
            Ok(v) => v,
            Err(_) => return Ok(None),
        },
        new_combo: false,
        difficulty,
        kind: HitKind::Slider {
            curve,
            curve_points,
            repeat,
            pixel_length,
            end_time: 0, // filled from the timing model once time is final
        },
    }))
}

// Format: x,y,time,type,hitSound,endTime,addition
fn parse_spinner(
    parts: &[&str],
    format_version: i32,
    difficulty: Difficulty,
) -> Option<HitObject> {
    if parts.len() < 6 {
        return None;
    }

    let mut end_time: i32 = parts[5].parse().ok()?;
    if format_version <= 4 {
        end_time += EARLY_VERSION_TIME_SHIFT;
    }

    Some(HitObject {
        x: parts[0].parse().ok()?,
        y: parts[1].parse().ok()?,
        time: parts[2].parse().ok()?,
        new_combo: false,
        difficulty,
        kind: HitKind::Spinner { end_time },
    })
}

/// Slider duration from the timing model: travel time over the path at
/// the velocity active at the slider's start, times the repeat count.
fn slider_end_time(
    time: i32,
    repeat: i32,
    pixel_length: f64,
    difficulty: &Difficulty,
    timing_points: &[TimingPoint],
) -> i32 {
    let Some(point) = timing_points.iter().rev().find(|tp| tp.offset < time as f64) else {
        return time;
    };
    if difficulty.slider_multiplier <= 0.0 || point.slider_velocity <= 0.0 {
        return time;
    }
    let beats = pixel_length / (100.0 * difficulty.slider_multiplier * point.slider_velocity);
    time + (beats * point.ms_per_beat * repeat as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_header() {
        assert_eq!(parse_version("osu file format v14").unwrap(), 14);
        assert_eq!(parse_version("osu file format v3").unwrap(), 3);
        assert!(parse_version("osu file format vX").is_err());
        assert!(parse_version("not a beatmap").is_err());
    }

    #[test]
    fn test_timing_point_v6_inherited_flag_is_inverted() {
        let point = parse_timing_point("59390,-50,4,2,1,50,0,0", 600.0, 14).unwrap();
        assert!(point.inherited);
        assert_eq!(point.ms_per_beat, 600.0);
        assert_eq!(point.slider_velocity, 2.0); // -100 / -50
        assert_eq!(point.beats_per_measure, 4);
    }

    #[test]
    fn test_timing_point_v6_non_inherited() {
        let point = parse_timing_point("2390,600,4,2,1,40,1,0", 0.0, 14).unwrap();
        assert!(!point.inherited);
        assert_eq!(point.ms_per_beat, 600.0);
        assert_eq!(point.slider_velocity, 1.0);
    }

    #[test]
    fn test_timing_point_v3_forces_meter_and_shifts_offset() {
        let point = parse_timing_point("1000,500", 0.0, 3).unwrap();
        assert_eq!(point.offset, 1024.0);
        assert_eq!(point.beats_per_measure, 4);
        assert!(!point.inherited);
    }

    #[test]
    fn test_timing_point_v5_has_no_inherited_concept() {
        let point = parse_timing_point("59390,-50,4,2,1,50,0", 600.0, 5).unwrap();
        assert!(!point.inherited);
        assert_eq!(point.ms_per_beat, -50.0);
        assert_eq!(point.offset, 59390.0);
    }

    #[test]
    fn test_timing_point_malformed_lines_skipped() {
        assert!(parse_timing_point("12345", 0.0, 14).is_none());
        assert!(parse_timing_point("", 0.0, 14).is_none());
        assert!(parse_timing_point("abc,def,4,2,1,50,1,0", 0.0, 14).is_none());
    }

    #[test]
    fn test_inherited_points_track_running_beat_duration() {
        let lines = vec![
            "444,365.853658536585,4,2,1,40,1,0".to_string(),
            "5000,-50,4,2,1,40,0,0".to_string(),
            "9000,300,4,2,1,40,1,0".to_string(),
            "12000,-100,4,2,1,40,0,0".to_string(),
        ];
        let points = parse_timing_points(&lines, 14);
        assert_eq!(points.len(), 4);
        assert_eq!(points[1].ms_per_beat, 365.853658536585);
        assert_eq!(points[1].slider_velocity, 2.0);
        assert_eq!(points[3].ms_per_beat, 300.0);
        assert_eq!(points[3].slider_velocity, 1.0);
    }

    fn difficulty() -> Difficulty {
        Difficulty {
            hp: 5.0,
            cs: 4.0,
            od: 7.0,
            ar: 9.0,
            slider_multiplier: 1.6,
            slider_tick_rate: 1.0,
        }
    }

    #[test]
    fn test_parse_circle_with_new_combo() {
        let object = parse_hit_object("112,168,809,5,0,0:0:0", 14, difficulty(), &[])
            .unwrap()
            .unwrap();
        assert_eq!((object.x, object.y, object.time), (112, 168, 809));
        assert!(object.new_combo);
        assert!(object.is_circle());
    }

    #[test]
    fn test_parse_circle_v3_trailing_comma_and_shift() {
        let object = parse_hit_object("64,120,1665,1,0,", 3, difficulty(), &[])
            .unwrap()
            .unwrap();
        assert_eq!(object.time, 1665 + 24);
        assert!(!object.new_combo);
    }

    #[test]
    fn test_parse_slider_keeps_all_points_from_v5_on() {
        let object = parse_hit_object(
            "140,316,444,6,0,L|128:257,1,60.0000022888184",
            14,
            difficulty(),
            &[],
        )
        .unwrap()
        .unwrap();
        assert!(object.new_combo);
        let HitKind::Slider {
            curve,
            curve_points,
            repeat,
            pixel_length,
            ..
        } = &object.kind
        else {
            panic!("expected slider");
        };
        assert_eq!(*curve, CurveKind::Linear);
        assert_eq!(*repeat, 1);
        assert_eq!(*pixel_length, 60.0000022888184);
        assert_eq!(curve_points.len(), 1);
        assert_eq!(curve_points[0].x, 128);
        assert_eq!(curve_points[0].y, 257);
        assert_eq!(curve_points[0].kind, CurvePointKind::Grey);
    }

    #[test]
    fn test_parse_slider_v4_drops_duplicated_head_point() {
        // v3/v4 sliders repeat the head position as the first point
        let object = parse_hit_object(
            "256,192,512,6,2,B|256:192|256:128|224:48,1,276",
            4,
            difficulty(),
            &[],
        )
        .unwrap()
        .unwrap();
        let HitKind::Slider { curve_points, .. } = &object.kind else {
            panic!("expected slider");
        };
        assert_eq!(curve_points.len(), 2);
        assert_eq!((curve_points[0].x, curve_points[0].y), (256, 128));
    }

    #[test]
    fn test_parse_slider_red_point_dedup() {
        let object = parse_hit_object(
            "424,96,66,2,0,B|380:120|332:96|332:96|304:124,1,130",
            14,
            difficulty(),
            &[],
        )
        .unwrap()
        .unwrap();
        let HitKind::Slider { curve_points, .. } = &object.kind else {
            panic!("expected slider");
        };
        assert_eq!(curve_points.len(), 3);
        assert_eq!(curve_points[0].kind, CurvePointKind::Grey);
        assert_eq!(curve_points[1].kind, CurvePointKind::Red);
        assert_eq!((curve_points[1].x, curve_points[1].y), (332, 96));
        assert_eq!(curve_points[2].kind, CurvePointKind::Grey);
    }

    #[test]
    fn test_parse_slider_end_time_from_timing_model() {
        let points = vec![TimingPoint {
            offset: 0.0,
            ms_per_beat: 500.0,
            beats_per_measure: 4,
            inherited: false,
            slider_velocity: 1.0,
        }];
        let object = parse_hit_object("100,100,1000,2,0,L|200:100,2,160", 14, difficulty(), &points)
            .unwrap()
            .unwrap();
        let HitKind::Slider { end_time, .. } = &object.kind else {
            panic!("expected slider");
        };
        // 160px / (100 * 1.6 * 1.0) = 1 beat = 500ms, repeated twice
        assert_eq!(*end_time, 2000);
    }

    #[test]
    fn test_parse_slider_unknown_type_is_fatal() {
        let result = parse_hit_object("424,96,66,2,0,Q|380:120,1,130", 14, difficulty(), &[]);
        assert!(matches!(result, Err(Error::UnknownSliderType(t)) if t == "Q"));
    }

    #[test]
    fn test_parse_spinner() {
        let object = parse_hit_object("256,192,9742,12,0,12050", 5, difficulty(), &[])
            .unwrap()
            .unwrap();
        assert!(object.is_spinner());
        assert_eq!(object.kind, HitKind::Spinner { end_time: 12050 });
    }

    #[test]
    fn test_parse_spinner_v3_shifts_both_times() {
        let object = parse_hit_object("256,192,9742,12,0,12050", 3, difficulty(), &[])
            .unwrap()
            .unwrap();
        assert_eq!(object.time, 9742 + 24);
        assert_eq!(object.kind, HitKind::Spinner { end_time: 12050 + 24 });
    }

    #[test]
    fn test_parse_hit_object_unknown_type_is_fatal() {
        let result = parse_hit_object("256,192,100,16,0,200", 14, difficulty(), &[]);
        assert!(matches!(result, Err(Error::UnknownObjectType(16))));
    }

    #[test]
    fn test_parse_hit_object_short_lines_skipped() {
        assert!(parse_hit_object("1,2,3", 14, difficulty(), &[]).unwrap().is_none());
        assert!(parse_hit_object("", 14, difficulty(), &[]).unwrap().is_none());
    }

    const SAMPLE: &str = "osu file format v14\n\
\n\
[General]\n\
AudioFilename: audio.mp3\n\
StackLeniency: 0.7\n\
Mode: 0\n\
\n\
[Metadata]\n\
Title:Kisetsu o Dakishimete ~blooming white love~\n\
Artist:Hashimoto Miyuki\n\
Creator:Kencho\n\
Version:Insane\n\
BeatmapID:654791\n\
BeatmapSetID:290683\n\
\n\
[Difficulty]\n\
HPDrainRate:6\n\
CircleSize:4\n\
OverallDifficulty:7\n\
ApproachRate:9\n\
SliderMultiplier:1.6\n\
SliderTickRate:1\n\
\n\
[Events]\n\
//Background and Video events\n\
\n\
[TimingPoints]\n\
444,365.853658536585,4,2,1,40,1,0\n\
155565,-100,4,2,1,40,0,0\n\
\n\
[HitObjects]\n\
140,316,444,6,0,L|128:257,1,60.0000022888184\n\
112,168,809,1,0,0:0:0:0:\n\
256,192,149712,12,4,155565,0:0:0:0:\n";

    #[test]
    fn test_parse_bytes_full_document() {
        let beatmap = parse_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(beatmap.format_version, 14);
        assert_eq!(beatmap.mode, GameMode::Standard);
        assert_eq!(beatmap.stack_leniency, 0.7);
        assert_eq!(beatmap.title, "Kisetsu o Dakishimete ~blooming white love~");
        assert_eq!(beatmap.artist, "Hashimoto Miyuki");
        assert_eq!(beatmap.creator, "Kencho");
        assert_eq!(beatmap.version, "Insane");
        assert_eq!(beatmap.beatmap_id.as_deref(), Some("654791"));
        assert_eq!(beatmap.set_id.as_deref(), Some("290683"));
        assert_eq!(beatmap.difficulty.hp, 6.0);
        assert_eq!(beatmap.difficulty.ar, 9.0);
        assert_eq!(beatmap.timing_points.len(), 2);
        assert!(beatmap.timing_points[1].inherited);
        assert_eq!(beatmap.hit_objects.len(), 3);
        assert!(beatmap.hit_objects[0].is_slider());
        assert!(beatmap.hit_objects[0].new_combo);
        assert!(beatmap.hit_objects[2].is_spinner());
        assert_eq!(beatmap.hash, format!("{:x}", md5::compute(SAMPLE.as_bytes())));
    }

    #[test]
    fn test_parse_bytes_ar_defaults_to_od() {
        let doc = SAMPLE.replace("ApproachRate:9\n", "");
        let beatmap = parse_bytes(doc.as_bytes()).unwrap();
        assert_eq!(beatmap.difficulty.ar, beatmap.difficulty.od);
        assert_eq!(beatmap.difficulty.ar, 7.0);
    }

    #[test]
    fn test_parse_bytes_mode_and_leniency_defaults() {
        let doc = SAMPLE.replace("Mode: 0\n", "").replace("StackLeniency: 0.7\n", "");
        let beatmap = parse_bytes(doc.as_bytes()).unwrap();
        assert_eq!(beatmap.mode, GameMode::Standard);
        assert_eq!(beatmap.stack_leniency, 0.7);
    }

    #[test]
    fn test_parse_bytes_missing_metadata_is_fatal() {
        let doc = SAMPLE.replace("Title:Kisetsu o Dakishimete ~blooming white love~\n", "");
        assert!(matches!(
            parse_bytes(doc.as_bytes()),
            Err(Error::MalformedSection { .. })
        ));
    }

    #[test]
    fn test_parse_bytes_rejects_old_versions() {
        let doc = SAMPLE.replace("osu file format v14", "osu file format v2");
        assert!(matches!(
            parse_bytes(doc.as_bytes()),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_bytes_empty_input() {
        assert!(matches!(
            parse_bytes(b""),
            Err(Error::FileMissingOrEmpty(_))
        ));
    }
}
