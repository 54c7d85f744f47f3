// voltlake-core/src/domain/catalog/staging.rs
//
// Staging phase: loosely-typed landing tables populated straight from the
// `;`-delimited flat files the scraper drops into object storage. No
// relational constraints here; correctness is enforced one phase later.

use super::{QualityTest, TableUnit, TEMPLATE_TEST_ROW_COUNT};

const DROP_STAGING_STATUS_CP: &str = "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_status_cp";

const CREATE_STAGING_STATUS_CP: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_status_cp
(
 status_cp                  VARCHAR       NOT NULL,
 id_cp                      VARCHAR       NOT NULL,
 parkingsensor_status       VARCHAR,
 ts                         TIMESTAMPTZ   NOT NULL
)";

const COPY_STAGING_STATUS_CP: &str = "\
COPY {{ SCHEMA }}.staging_status_cp
FROM '{{ STATUS_DATA_CHARGING_POINT }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1";

const DROP_STAGING_STATUS_CONNECTORS: &str =
    "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_status_connectors";

const CREATE_STAGING_STATUS_CONNECTORS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_status_connectors
(
 status_connector  VARCHAR       NOT NULL,
 id_connector      VARCHAR       NOT NULL,
 ts                TIMESTAMPTZ   NOT NULL
)";

const COPY_STAGING_STATUS_CONNECTORS: &str = "\
COPY {{ SCHEMA }}.staging_status_connectors
FROM '{{ STATUS_DATA_CHARGING_CONNECTORS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1";

const DROP_STAGING_CHARGING_STATIONS: &str =
    "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_charging_stations";

const CREATE_STAGING_CHARGING_STATIONS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_charging_stations
(
 id                      INTEGER,
 name                    VARCHAR,
 address                 VARCHAR,
 city                    VARCHAR,
 postal_code             VARCHAR,
 country                 VARCHAR,
 distance_in_m           FLOAT,
 owner                   VARCHAR,
 roaming                 BOOLEAN,
 latitude                FLOAT,
 longitude               FLOAT,
 operator_name           VARCHAR,
 operator_hotline        VARCHAR,
 open_24_7               BOOLEAN
)";

const COPY_STAGING_CHARGING_STATIONS: &str = "\
COPY {{ SCHEMA }}.staging_charging_stations
FROM '{{ MASTER_DATA_CHARGING_STATIONS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1
EMPTYASNULL";

const DROP_STAGING_CHARGING_POINTS: &str =
    "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_charging_points";

const CREATE_STAGING_CHARGING_POINTS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_charging_points
(
 id_cs                      INTEGER NOT NULL,
 charging_station_position  VARCHAR,
 roaming                    BOOLEAN,
 physical_reference         VARCHAR,
 cp_parking_space_numbers   VARCHAR,
 cp_position                VARCHAR,
 cp_public_comment          VARCHAR,
 id                         VARCHAR,
 vehicle_type               VARCHAR,
 floor_level                VARCHAR,
 uid                        INTEGER NOT NULL
)";

const COPY_STAGING_CHARGING_POINTS: &str = "\
COPY {{ SCHEMA }}.staging_charging_points
FROM '{{ MASTER_DATA_CHARGING_POINTS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1
EMPTYASNULL";

const DROP_STAGING_CONNECTORS: &str = "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_connectors";

const CREATE_STAGING_CONNECTORS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_connectors
(
 id_cp          VARCHAR NOT NULL,
 format         VARCHAR,
 power_type     VARCHAR,
 id             VARCHAR,
 tariff_id      VARCHAR,
 ampere         INTEGER,
 max_power      INTEGER,
 voltage        INTEGER,
 standard       VARCHAR
)";

const COPY_STAGING_CONNECTORS: &str = "\
COPY {{ SCHEMA }}.staging_connectors
FROM '{{ MASTER_DATA_CONNECTORS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1";

// POI landings: one table per geometry kind, because a shapefile can only
// carry a single geometry type. All three share the flattened layout.

const DROP_STAGING_POI_POINTS: &str = "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_poi_points";
const DROP_STAGING_POI_POLYGONS: &str = "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_poi_polygons";
const DROP_STAGING_POI_MULTIPOLYGONS: &str =
    "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_poi_multipolygons";

const CREATE_STAGING_POI_POINTS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_poi_points
(
 id_poi         VARCHAR NOT NULL,
 poi_cat        VARCHAR,
 longitude      FLOAT,
 latitude       FLOAT,
 city           VARCHAR
)";

const CREATE_STAGING_POI_POLYGONS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_poi_polygons
(
 id_poi         VARCHAR NOT NULL,
 poi_cat        VARCHAR,
 longitude      FLOAT,
 latitude       FLOAT,
 city           VARCHAR
)";

const CREATE_STAGING_POI_MULTIPOLYGONS: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_poi_multipolygons
(
 id_poi         VARCHAR NOT NULL,
 poi_cat        VARCHAR,
 longitude      FLOAT,
 latitude       FLOAT,
 city           VARCHAR
)";

const COPY_STAGING_POI_POINTS: &str = "\
COPY {{ SCHEMA }}.staging_poi_points
FROM '{{ POI_DATA_POINTS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1
EMPTYASNULL";

const COPY_STAGING_POI_POLYGONS: &str = "\
COPY {{ SCHEMA }}.staging_poi_polygons
FROM '{{ POI_DATA_POLYGONS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1
EMPTYASNULL";

const COPY_STAGING_POI_MULTIPOLYGONS: &str = "\
COPY {{ SCHEMA }}.staging_poi_multipolygons
FROM '{{ POI_DATA_MULTIPOLYGONS }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1
EMPTYASNULL";

const DROP_STAGING_POI_CS_MAPPING: &str =
    "DROP TABLE IF EXISTS {{ SCHEMA }}.staging_poi_cs_mapping";

const CREATE_STAGING_POI_CS_MAPPING: &str = "\
CREATE TABLE IF NOT EXISTS {{ SCHEMA }}.staging_poi_cs_mapping
(
 id_poi         VARCHAR NOT NULL,
 id_cs          INTEGER NOT NULL
)";

const COPY_STAGING_POI_CS_MAPPING: &str = "\
COPY {{ SCHEMA }}.staging_poi_cs_mapping
FROM '{{ POI_STATION_MAPPING }}'
CREDENTIALS 'aws_iam_role={{ ROLE_ARN }}'
REGION '{{ REGION }}'
DELIMITER ';' IGNOREHEADER 1";

pub(super) fn units() -> Vec<TableUnit> {
    vec![
        TableUnit::new(
            "staging_status_cp",
            CREATE_STAGING_STATUS_CP,
            COPY_STAGING_STATUS_CP,
        )
        .with_drop(DROP_STAGING_STATUS_CP)
        .with_test(QualityTest::all(
            "row_count_staging_status_cp",
            TEMPLATE_TEST_ROW_COUNT,
        )),
        TableUnit::new(
            "staging_status_connectors",
            CREATE_STAGING_STATUS_CONNECTORS,
            COPY_STAGING_STATUS_CONNECTORS,
        )
        .with_drop(DROP_STAGING_STATUS_CONNECTORS)
        .with_test(QualityTest::all(
            "row_count_staging_connectors",
            TEMPLATE_TEST_ROW_COUNT,
        )),
        TableUnit::new(
            "staging_charging_stations",
            CREATE_STAGING_CHARGING_STATIONS,
            COPY_STAGING_CHARGING_STATIONS,
        )
        .with_drop(DROP_STAGING_CHARGING_STATIONS),
        TableUnit::new(
            "staging_charging_points",
            CREATE_STAGING_CHARGING_POINTS,
            COPY_STAGING_CHARGING_POINTS,
        )
        .with_drop(DROP_STAGING_CHARGING_POINTS),
        TableUnit::new(
            "staging_connectors",
            CREATE_STAGING_CONNECTORS,
            COPY_STAGING_CONNECTORS,
        )
        .with_drop(DROP_STAGING_CONNECTORS),
        TableUnit::new(
            "staging_poi_points",
            CREATE_STAGING_POI_POINTS,
            COPY_STAGING_POI_POINTS,
        )
        .with_drop(DROP_STAGING_POI_POINTS),
        TableUnit::new(
            "staging_poi_polygons",
            CREATE_STAGING_POI_POLYGONS,
            COPY_STAGING_POI_POLYGONS,
        )
        .with_drop(DROP_STAGING_POI_POLYGONS),
        TableUnit::new(
            "staging_poi_multipolygons",
            CREATE_STAGING_POI_MULTIPOLYGONS,
            COPY_STAGING_POI_MULTIPOLYGONS,
        )
        .with_drop(DROP_STAGING_POI_MULTIPOLYGONS),
        TableUnit::new(
            "staging_poi_cs_mapping",
            CREATE_STAGING_POI_CS_MAPPING,
            COPY_STAGING_POI_CS_MAPPING,
        )
        .with_drop(DROP_STAGING_POI_CS_MAPPING),
    ]
}
