#![cfg(feature = "std")]

use std::path::Path;

use csv::ReaderBuilder;
use sextant::avec::{Config, Fix, Parser, Status};

const PATH: &str = "fixtures/cycles.nmea";

#[test]
fn decode_slice_cycles() {
    let data = std::fs::read(PATH).unwrap();
    let mut parser = Parser::new(Config::default());
    let fixes: Vec<Fix> = sextant::avec::fixes(&data, &mut parser).collect();

    Validator::new(PATH).validate(&fixes);
}

#[test]
fn decode_reader_cycles() {
    let file = std::fs::File::open(PATH).unwrap();
    let mut reader = std::io::BufReader::new(file);
    let mut parser = Parser::new(Config::default());

    let mut fixes = Vec::new();
    while let Some(fix) = sextant::avec::decode_reader(&mut reader, &mut parser).unwrap() {
        fixes.push(fix);
    }

    Validator::new(PATH).validate(&fixes);
}

#[test]
fn decode_byte_by_byte_cycles() {
    let data = std::fs::read(PATH).unwrap();
    let mut parser = Parser::new(Config::default());

    let mut fixes = Vec::new();
    for b in data {
        if parser.update(b) == Status::NewData {
            fixes.push(*parser.fix());
        }
    }

    Validator::new(PATH).validate(&fixes);
}

#[test]
fn chunking_does_not_change_fixes() {
    let data = std::fs::read(PATH).unwrap();

    let mut parser = Parser::default();
    let whole: Vec<Fix> = sextant::avec::fixes(&data, &mut parser).collect();

    for pattern in [&[1][..], &[2], &[3, 5], &[7, 1, 13], &[64], &[100, 1, 1, 250]] {
        let mut parser = Parser::default();
        let mut fixes = Vec::new();
        let mut rest = &data[..];

        for size in pattern.iter().cycle() {
            if rest.is_empty() {
                break;
            }
            let (chunk, tail) = rest.split_at((*size).min(rest.len()));
            fixes.extend(sextant::avec::fixes(chunk, &mut parser));
            rest = tail;
        }

        assert_eq!(fixes, whole, "chunk pattern {pattern:?}");
    }
}

struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn validate(&self, fixes: &[Fix]) {
        assert_eq!(fixes.len(), self.0.len());

        for (fix, row) in fixes.iter().zip(&self.0) {
            let int = |i: usize| row[i].parse::<u32>().unwrap();
            let real = |i: usize| row[i].parse::<f32>().unwrap();
            let close = |actual: f32, i: usize| {
                assert!(
                    (actual - real(i)).abs() < 1e-3,
                    "column {i}: expected {}, found {actual}",
                    row[i]
                );
            };

            let t = fix.time;
            assert_eq!(
                [t.hours, t.minutes, t.seconds, t.hundredths].map(u32::from),
                [int(0), int(1), int(2), int(3)]
            );
            let d = fix.date;
            assert_eq!(
                [d.day, d.month, d.year].map(u32::from),
                [int(4), int(5), int(6)]
            );

            close(fix.latitude, 7);
            close(fix.longitude, 8);
            close(fix.altitude, 9);
            assert_eq!(u32::from(fix.quality), int(10));
            assert_eq!(u32::from(fix.satellites), int(11));
            close(fix.hdop, 12);
            close(fix.pdop, 13);
            close(fix.vdop, 14);
            assert_eq!(u32::from(fix.mode), int(15));
            assert_eq!(fix.valid, row[16].parse::<bool>().unwrap());
            close(fix.speed, 17);
            close(fix.course, 18);
            assert_eq!(u32::from(fix.in_view), int(19));

            let ids: Vec<String> = fix.satellite_ids().map(|id| id.to_string()).collect();
            assert_eq!(ids.join(" "), row[20]);

            let satellites: Vec<String> = fix
                .satellites_in_view()
                .iter()
                .map(|s| format!("{}:{}:{}:{}", s.id, s.elevation, s.azimuth, s.snr))
                .collect();
            assert_eq!(satellites.join(" "), row[21]);
        }
    }
}
