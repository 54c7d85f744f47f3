// voltlake-core/src/domain/catalog/warehouse.rs
//
// Main phase: the typed, primary-keyed warehouse tables, each derived from
// its staging counterpart via insert-as-select. Status rows get a hashed
// composite key, dimension rows are deduplicated via grouping, and every
// table is gated by quality tests before the pipeline moves on.
//
// Unlike staging, main tables are never dropped: a rerun relies on
// create-if-not-exists plus the introspection-guarded pkey drop. A unit
// that dropped its own table would leave nothing for the constraint drop
// to run against.

use super::{QualityTest, TableUnit, TEMPLATE_TEST_ROW_COUNT};

// --- status_chargingpoints ---

const CREATE_STATUS_CP: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.status_chargingpoints
(
 id_status_cp               VARCHAR NOT NULL,
 id_chargingpoint           VARCHAR NOT NULL,
 query_time                 TIMESTAMPTZ NOT NULL,
 status_cp                  VARCHAR,
 status_parkingsensor       VARCHAR,
 CONSTRAINT status_chargingpoints_pkey PRIMARY KEY (id_status_cp)
)";

const DROP_STATUS_CP_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.status_chargingpoints DROP CONSTRAINT status_chargingpoints_pkey";

const INSERT_STATUS_CP: &str = "\
INSERT INTO {{ SCHEMA }}.status_chargingpoints (
    SELECT
        md5(id_cp || ts) as id_status_cp,
        id_cp as id_chargingpoint,
        ts as query_time,
        status_cp,
        parkingsensor_status as status_parkingsensor
    FROM {{ SCHEMA }}.staging_status_cp
)";

const TEST_UNIQUE_STATUS_CP: &str = "\
select count(*) = count(distinct id_status_cp) from {{ SCHEMA }}.{{ TABLE_NAME }}";

// --- status_connectors ---

const CREATE_STATUS_CONNECTORS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.status_connectors
(
 id_status_connector                VARCHAR NOT NULL,
 id_connector                       VARCHAR NOT NULL,
 query_time                         TIMESTAMPTZ NOT NULL,
 status_connector                   VARCHAR,
 CONSTRAINT status_connectors_pkey PRIMARY KEY (id_status_connector)
)";

const DROP_STATUS_CONNECTORS_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.status_connectors DROP CONSTRAINT status_connectors_pkey";

const INSERT_STATUS_CONNECTORS: &str = "\
INSERT INTO {{ SCHEMA }}.status_connectors (
    SELECT
        md5(id_connector || ts) as id_status_connector,
        id_connector,
        ts as query_time,
        status_connector
    FROM {{ SCHEMA }}.staging_status_connectors
)";

const TEST_UNIQUE_STATUS_CONNECTORS: &str = "\
select count(*) = count(distinct id_status_connector) from {{ SCHEMA }}.{{ TABLE_NAME }}";

// --- charging_station ---

const CREATE_CHARGING_STATION: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.charging_station
(
 id_cs                      INTEGER,
 name                       VARCHAR,
 address                    VARCHAR,
 city                       VARCHAR,
 postal_code                VARCHAR,
 country                    VARCHAR,
 owner                      VARCHAR,
 roaming                    BOOLEAN,
 latitude                   FLOAT,
 longitude                  FLOAT,
 operator_name              VARCHAR,
 operator_hotline           VARCHAR,
 open_24_7                  BOOLEAN,
 CONSTRAINT charging_station_pkey PRIMARY KEY (id_cs)
)";

const DROP_CHARGING_STATION_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.charging_station DROP CONSTRAINT charging_station_pkey";

const INSERT_CHARGING_STATION: &str = "\
INSERT INTO {{ SCHEMA }}.charging_station (
    SELECT DISTINCT
        id as id_cs,
        trim(name) as name,
        trim(address) as address,
        city,
        postal_code,
        country,
        owner,
        roaming,
        latitude,
        longitude,
        operator_name,
        operator_hotline,
        open_24_7
    FROM {{ SCHEMA }}.staging_charging_stations
)";

const TEST_STATION_COORDINATES: &str = "\
select latitude between -90 and 90 and longitude between -180 and 180
from {{ SCHEMA }}.{{ TABLE_NAME }}
where latitude is not null and longitude is not null";

// --- charging_point ---

const CREATE_CHARGING_POINT: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.charging_point
(
 id_cp                          VARCHAR NOT NULL,
 id_cs                          INTEGER NOT NULL,
 charging_station_position      VARCHAR,
 roaming                        BOOLEAN,
 physical_reference             VARCHAR,
 cp_parking_space_numbers       VARCHAR,
 cp_position                    VARCHAR,
 vehicle_type                   VARCHAR,
 floor_level                    VARCHAR,
 CONSTRAINT charging_point_pkey PRIMARY KEY (id_cp)
)";

const DROP_CHARGING_POINT_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.charging_point DROP CONSTRAINT charging_point_pkey";

const INSERT_CHARGING_POINT: &str = "\
INSERT INTO {{ SCHEMA }}.charging_point (
    SELECT DISTINCT
        id as id_cp,
        id_cs,
        charging_station_position,
        roaming,
        physical_reference,
        cp_parking_space_numbers,
        cp_position,
        vehicle_type,
        floor_level
    FROM {{ SCHEMA }}.staging_charging_points
)";

const TEST_UNIQUE_CHARGING_POINT: &str = "\
select count(*) = count(distinct id_cp) from {{ SCHEMA }}.{{ TABLE_NAME }}";

// --- connector ---

const CREATE_CONNECTOR: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.connector
(
 id_connector               VARCHAR NOT NULL,
 id_cp                      VARCHAR NOT NULL,
 format                     VARCHAR,
 power_type                 VARCHAR,
 ampere                     INTEGER,
 max_power                  INTEGER,
 voltage                    INTEGER,
 standard                   VARCHAR,
 CONSTRAINT connector_pkey PRIMARY KEY (id_connector)
)";

const DROP_CONNECTOR_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.connector DROP CONSTRAINT connector_pkey";

const INSERT_CONNECTOR: &str = "\
INSERT INTO {{ SCHEMA }}.connector (
    SELECT DISTINCT
        id as id_connector,
        id_cp,
        format,
        power_type,
        ampere,
        max_power,
        voltage,
        standard
    FROM {{ SCHEMA }}.staging_connectors
)";

// Plausibility bounds for AC/DC charging hardware: anything outside
// 2..400 kW is a scraper artefact, not a real connector.
const TEST_POWER_LIMITS: &str = "\
select max_power between 2 and 400
from {{ SCHEMA }}.{{ TABLE_NAME }}
where max_power is not null";

const TEST_HAS_FAST_CHARGER: &str = "\
select max_power >= 50
from {{ SCHEMA }}.{{ TABLE_NAME }}
where max_power is not null";

// --- time dimension ---

const CREATE_TIME: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.\"time\"
(
 query_time                 TIMESTAMPTZ NOT NULL,
 \"hour\"                     INTEGER,
 \"day\"                      INTEGER,
 week                       INTEGER,
 \"month\"                    INTEGER,
 \"year\"                     INTEGER,
 weekday                    INTEGER,
 CONSTRAINT time_pkey PRIMARY KEY (query_time)
)";

const DROP_TIME_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.\"time\" DROP CONSTRAINT time_pkey";

const INSERT_TIME: &str = "\
INSERT INTO {{ SCHEMA }}.\"time\" (
    SELECT
        ts as query_time,
        min(extract(hour from ts)) as \"hour\",
        min(extract(day from ts)) as \"day\",
        min(extract(week from ts)) as week,
        min(extract(month from ts)) as \"month\",
        min(extract(year from ts)) as \"year\",
        min(extract(dayofweek from ts)) as weekday
    FROM {{ SCHEMA }}.staging_status_cp
    GROUP BY ts
)";

// 'time' is a reserved identifier, so these tests quote it themselves
// instead of relying on the injected table name.
const TEST_TIME_ROW_COUNT: &str = "select count(*) > 0 from {{ SCHEMA }}.\"time\"";

const TEST_TIME_HOUR_BOUNDS: &str = "\
select \"hour\" between 0 and 23 from {{ SCHEMA }}.\"time\"";

// --- poi ---

const CREATE_POI: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.poi
(
 id_poi         VARCHAR NOT NULL,
 poi_cat        VARCHAR,
 city           VARCHAR,
 latitude       FLOAT,
 longitude      FLOAT,
 CONSTRAINT poi_pkey PRIMARY KEY (id_poi)
)";

const DROP_POI_PKEY: &str = "ALTER TABLE {{ SCHEMA }}.poi DROP CONSTRAINT poi_pkey";

// The three geometry landings overlap (an OSM element can appear in more
// than one extract), hence the grouped dedup on id_poi.
const INSERT_POI: &str = "\
INSERT INTO {{ SCHEMA }}.poi (
    SELECT
        id_poi,
        min(poi_cat) as poi_cat,
        min(city) as city,
        min(latitude) as latitude,
        min(longitude) as longitude
    FROM (
        SELECT id_poi, poi_cat, longitude, latitude, city FROM {{ SCHEMA }}.staging_poi_points
        UNION ALL
        SELECT id_poi, poi_cat, longitude, latitude, city FROM {{ SCHEMA }}.staging_poi_polygons
        UNION ALL
        SELECT id_poi, poi_cat, longitude, latitude, city FROM {{ SCHEMA }}.staging_poi_multipolygons
    )
    GROUP BY id_poi
)";

const TEST_UNIQUE_POI: &str = "\
select count(*) = count(distinct id_poi) from {{ SCHEMA }}.{{ TABLE_NAME }}";

// --- poi_station_mapping ---

const CREATE_POI_STATION_MAPPING: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.poi_station_mapping
(
 id_mapping     VARCHAR NOT NULL,
 id_poi         VARCHAR NOT NULL,
 id_cs          INTEGER NOT NULL,
 CONSTRAINT poi_station_mapping_pkey PRIMARY KEY (id_mapping)
)";

const DROP_POI_STATION_MAPPING_PKEY: &str =
    "ALTER TABLE {{ SCHEMA }}.poi_station_mapping DROP CONSTRAINT poi_station_mapping_pkey";

const INSERT_POI_STATION_MAPPING: &str = "\
INSERT INTO {{ SCHEMA }}.poi_station_mapping (
    SELECT
        md5(id_poi || id_cs) as id_mapping,
        id_poi,
        id_cs
    FROM {{ SCHEMA }}.staging_poi_cs_mapping
    GROUP BY id_poi, id_cs
)";

pub(super) fn units() -> Vec<TableUnit> {
    vec![
        TableUnit::new("status_chargingpoints", CREATE_STATUS_CP, INSERT_STATUS_CP)
            .with_constraint_drop("status_chargingpoints_pkey", DROP_STATUS_CP_PKEY)
            .with_test(QualityTest::all(
                "row_count_status_chargingpoints",
                TEMPLATE_TEST_ROW_COUNT,
            ))
            .with_test(QualityTest::all(
                "unique_status_chargingpoints",
                TEST_UNIQUE_STATUS_CP,
            )),
        TableUnit::new(
            "status_connectors",
            CREATE_STATUS_CONNECTORS,
            INSERT_STATUS_CONNECTORS,
        )
        .with_constraint_drop("status_connectors_pkey", DROP_STATUS_CONNECTORS_PKEY)
        .with_test(QualityTest::all(
            "row_count_status_connectors",
            TEMPLATE_TEST_ROW_COUNT,
        ))
        .with_test(QualityTest::all(
            "unique_status_connectors",
            TEST_UNIQUE_STATUS_CONNECTORS,
        )),
        TableUnit::new(
            "charging_station",
            CREATE_CHARGING_STATION,
            INSERT_CHARGING_STATION,
        )
        .with_constraint_drop("charging_station_pkey", DROP_CHARGING_STATION_PKEY)
        .with_test(QualityTest::all(
            "row_count_charging_station",
            TEMPLATE_TEST_ROW_COUNT,
        ))
        .with_test(QualityTest::all(
            "station_coordinates_in_bounds",
            TEST_STATION_COORDINATES,
        )),
        TableUnit::new(
            "charging_point",
            CREATE_CHARGING_POINT,
            INSERT_CHARGING_POINT,
        )
        .with_constraint_drop("charging_point_pkey", DROP_CHARGING_POINT_PKEY)
        .with_test(QualityTest::all(
            "row_count_charging_point",
            TEMPLATE_TEST_ROW_COUNT,
        ))
        .with_test(QualityTest::all(
            "unique_charging_point",
            TEST_UNIQUE_CHARGING_POINT,
        )),
        TableUnit::new("connector", CREATE_CONNECTOR, INSERT_CONNECTOR)
            .with_constraint_drop("connector_pkey", DROP_CONNECTOR_PKEY)
            .with_test(QualityTest::all(
                "row_count_connectors",
                TEMPLATE_TEST_ROW_COUNT,
            ))
            .with_test(QualityTest::all(
                "power_limits_connectors",
                TEST_POWER_LIMITS,
            ))
            .with_test(QualityTest::any(
                "has_fast_charger",
                TEST_HAS_FAST_CHARGER,
            )),
        TableUnit::new("time", CREATE_TIME, INSERT_TIME)
            .with_constraint_drop("time_pkey", DROP_TIME_PKEY)
            .with_test(QualityTest::all("row_count_time", TEST_TIME_ROW_COUNT))
            .with_test(QualityTest::all("time_hour_bounds", TEST_TIME_HOUR_BOUNDS)),
        TableUnit::new("poi", CREATE_POI, INSERT_POI)
            .with_constraint_drop("poi_pkey", DROP_POI_PKEY)
            .with_test(QualityTest::all("row_count_poi", TEMPLATE_TEST_ROW_COUNT))
            .with_test(QualityTest::all("unique_poi", TEST_UNIQUE_POI)),
        TableUnit::new(
            "poi_station_mapping",
            CREATE_POI_STATION_MAPPING,
            INSERT_POI_STATION_MAPPING,
        )
        .with_constraint_drop("poi_station_mapping_pkey", DROP_POI_STATION_MAPPING_PKEY)
        .with_test(QualityTest::all(
            "row_count_poi_station_mapping",
            TEMPLATE_TEST_ROW_COUNT,
        )),
    ]
}
