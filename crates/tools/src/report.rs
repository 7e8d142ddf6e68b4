use clap::ValueEnum;
use foundation::math::{GeoCoordinate, Vec3};
use globe::spin::AutoRotation;
use globe::{ResolvedClick, RotationState, texture_uv};
use serde::Serialize;
use territory::{Classification, DatasetStatus, TerritoryStore};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

pub trait TextReport {
    fn to_text(&self) -> String;
}

pub fn render<T>(report: &T, format: OutputFormat) -> Result<String, String>
where
    T: Serialize + TextReport,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).map_err(|e| format!("json: {e}"))
        }
        OutputFormat::Text => Ok(report.to_text()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateReport {
    pub lat_deg: f64,
    pub lng_deg: f64,
    /// Equirectangular texture coordinates of the same spot.
    pub uv: [f64; 2],
}

impl From<GeoCoordinate> for CoordinateReport {
    fn from(coord: GeoCoordinate) -> Self {
        Self {
            lat_deg: coord.lat_deg,
            lng_deg: coord.lng_deg,
            uv: texture_uv(coord),
        }
    }
}

/// Validate user-supplied degrees. Out-of-range latitude is an error rather
/// than being clamped; longitude wraps.
pub fn checked_coordinate(lat_deg: f64, lng_deg: f64) -> Result<GeoCoordinate, String> {
    if !(lat_deg.is_finite() && lng_deg.is_finite()) {
        return Err("latitude and longitude must be finite".to_string());
    }
    if !(-90.0..=90.0).contains(&lat_deg) {
        return Err(format!("latitude {lat_deg} is outside [-90, 90]"));
    }
    Ok(GeoCoordinate::new(lat_deg, lng_deg))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerritoryReport {
    Territory {
        name: String,
        index: usize,
    },
    Ocean,
    /// The dataset was not configured, is still loading, or failed to load.
    Unavailable {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl TerritoryReport {
    pub fn classify(store: &TerritoryStore, coord: GeoCoordinate) -> Self {
        match store.classify(coord) {
            Classification::Territory { index, name } => TerritoryReport::Territory { name, index },
            Classification::Ocean => TerritoryReport::Ocean,
            Classification::Unavailable => TerritoryReport::Unavailable {
                reason: match store.status() {
                    DatasetStatus::Pending => Some("no territory dataset configured".to_string()),
                    DatasetStatus::Loading => Some("territory dataset still loading".to_string()),
                    DatasetStatus::Unavailable => store.failure(),
                    DatasetStatus::Ready => None,
                },
            },
        }
    }

    fn label(&self) -> &str {
        match self {
            TerritoryReport::Territory { name, .. } => name.as_str(),
            TerritoryReport::Ocean => "ocean",
            TerritoryReport::Unavailable { .. } => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickReport {
    pub coord: CoordinateReport,
    pub rotation_rad: f64,
    pub world_point: [f64; 3],
    pub object_point: [f64; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub territory: TerritoryReport,
}

impl ClickReport {
    pub fn from_point(
        world: Vec3,
        object: Vec3,
        rotation: RotationState,
        coord: GeoCoordinate,
        territory: TerritoryReport,
    ) -> Self {
        Self {
            coord: coord.into(),
            rotation_rad: rotation.angle_rad,
            world_point: [world.x, world.y, world.z],
            object_point: [object.x, object.y, object.z],
            distance: None,
            territory,
        }
    }

    pub fn from_ray(
        click: &ResolvedClick,
        rotation: RotationState,
        territory: TerritoryReport,
    ) -> Self {
        let mut report = Self::from_point(
            click.hit.point,
            click.object_point,
            rotation,
            click.coord,
            territory,
        );
        report.distance = Some(click.hit.distance);
        report
    }
}

impl TextReport for ClickReport {
    fn to_text(&self) -> String {
        let mut out = format!(
            "lat={:.4} lng={:.4} territory={}",
            self.coord.lat_deg,
            self.coord.lng_deg,
            self.territory.label()
        );
        if let Some(d) = self.distance {
            out.push_str(&format!(" distance={d:.4}"));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocateReport {
    pub coord: CoordinateReport,
    pub territory: TerritoryReport,
}

impl TextReport for LocateReport {
    fn to_text(&self) -> String {
        format!(
            "lat={:.4} lng={:.4} territory={}",
            self.coord.lat_deg,
            self.coord.lng_deg,
            self.territory.label()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinReport {
    pub frames: u64,
    pub rate_rad_per_s: f64,
    pub angle_rad: f64,
    pub angle_deg: f64,
}

impl SpinReport {
    /// Run the auto-rotation for `seconds` at `fps` frames per second.
    pub fn simulate(seconds: f64, fps: u32, rate_rad_per_s: f64) -> Result<Self, String> {
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err("--seconds must be a non-negative number".to_string());
        }
        if fps == 0 {
            return Err("--fps must be positive".to_string());
        }
        if !rate_rad_per_s.is_finite() {
            return Err(format!("rotation rate must be finite, got {rate_rad_per_s}"));
        }
        let frames = (seconds * f64::from(fps)).round() as u64;
        let mut spin = AutoRotation::new(rate_rad_per_s);
        spin.advance_frames(frames, 1.0 / f64::from(fps));
        let angle = spin.snapshot().angle_rad;
        Ok(Self {
            frames,
            rate_rad_per_s,
            angle_rad: angle,
            angle_deg: angle.to_degrees(),
        })
    }
}

impl TextReport for SpinReport {
    fn to_text(&self) -> String {
        format!(
            "frames={} angle_rad={:.6} angle_deg={:.4}",
            self.frames, self.angle_rad, self.angle_deg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ClickReport, LocateReport, OutputFormat, SpinReport, TerritoryReport, TextReport,
        checked_coordinate, render,
    };
    use foundation::math::{GeoCoordinate, Vec3};
    use globe::RotationState;
    use pretty_assertions::assert_eq;
    use territory::TerritoryStore;

    #[test]
    fn territory_report_tags_unavailable_with_reason() {
        let store = TerritoryStore::new();
        let r = TerritoryReport::classify(&store, GeoCoordinate::new(0.0, 0.0));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "unavailable", "reason": "no territory dataset configured"})
        );

        let _ticket = store.begin_load().unwrap();
        let r = TerritoryReport::classify(&store, GeoCoordinate::new(0.0, 0.0));
        assert_eq!(
            r,
            TerritoryReport::Unavailable {
                reason: Some("territory dataset still loading".to_string())
            }
        );
    }

    #[test]
    fn ocean_and_territory_serialize_distinctly() {
        let ocean = serde_json::to_value(TerritoryReport::Ocean).unwrap();
        assert_eq!(ocean, serde_json::json!({"kind": "ocean"}));

        let t = TerritoryReport::Territory {
            name: "Japan".to_string(),
            index: 0,
        };
        assert_eq!(
            serde_json::to_value(&t).unwrap(),
            serde_json::json!({"kind": "territory", "name": "Japan", "index": 0})
        );
    }

    #[test]
    fn click_text_uses_four_decimals() {
        let report = ClickReport::from_point(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            RotationState::default(),
            GeoCoordinate::new(0.0, 90.0),
            TerritoryReport::Ocean,
        );
        assert_eq!(report.to_text(), "lat=0.0000 lng=90.0000 territory=ocean");
        let json = render(&report, OutputFormat::Json).unwrap();
        assert!(json.contains("\"uv\""));
        assert!(!json.contains("distance"));
    }

    #[test]
    fn locate_text() {
        let report = LocateReport {
            coord: GeoCoordinate::new(35.6762, 139.6503).into(),
            territory: TerritoryReport::Territory {
                name: "Japan".to_string(),
                index: 0,
            },
        };
        assert_eq!(
            render(&report, OutputFormat::Text).unwrap(),
            "lat=35.6762 lng=139.6503 territory=Japan"
        );
    }

    #[test]
    fn spin_rejects_non_finite_rates() {
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = SpinReport::simulate(1.0, 60, rate).unwrap_err();
            assert!(err.contains("finite"), "{err}");
        }
        assert!(SpinReport::simulate(-1.0, 60, 0.1).is_err());
        assert!(SpinReport::simulate(1.0, 0, 0.1).is_err());
    }

    #[test]
    fn spin_handles_very_long_runs_without_iterating() {
        let report = SpinReport::simulate(1e15, 60, 0.1).unwrap();
        assert_eq!(report.frames, 60_000_000_000_000_000);
        assert!((0.0..std::f64::consts::TAU).contains(&report.angle_rad));
        assert!(report.angle_deg.is_finite());

        let short = SpinReport::simulate(10.0, 60, 0.1).unwrap();
        assert_eq!(short.frames, 600);
        assert!((short.angle_rad - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let err = checked_coordinate(200.0, 10.0).unwrap_err();
        assert!(err.contains("latitude 200"), "{err}");
        assert!(checked_coordinate(-90.5, 0.0).is_err());
        assert!(checked_coordinate(f64::NAN, 0.0).is_err());

        let c = checked_coordinate(-90.0, 185.0).unwrap();
        assert_eq!(c.lat_deg, -90.0);
        assert!((c.lng_deg + 175.0).abs() < 1e-12);
    }
}
