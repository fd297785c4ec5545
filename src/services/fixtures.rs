//! Static data backing the mock services and the offline map fallback.

use crate::domain::model::{
    AttributeValueType, Binding, CountryCoordinates, Entity, EntityAttribute, EntityInfo,
    EntityType, HealthMetric, HealthMetrics, MetricCategory, RelatedEntity, SampleQuery,
    Source, SparqlHead, SparqlQueryResponse, SparqlResults, SparqlValue,
};

fn entity(id: &str, label: &str, iso3: Option<&str>, entity_type: EntityType) -> Entity {
    Entity {
        id: id.to_string(),
        label: label.to_string(),
        iso3_code: iso3.map(str::to_string),
        entity_type,
    }
}

pub fn entities() -> Vec<Entity> {
    use EntityType::*;
    vec![
        entity("wd:Q252", "Indonesia", Some("IDN"), Country),
        entity("wd:Q668", "India", Some("IND"), Country),
        entity("wd:Q155", "Brazil", Some("BRA"), Country),
        entity("wd:Q30", "United States", Some("USA"), Country),
        entity("wd:Q148", "China", Some("CHN"), Country),
        entity("wd:Q55", "Netherlands", Some("NLD"), Country),
        entity("wd:Q145", "United Kingdom", Some("GBR"), Country),
        entity("wd:Q183", "Germany", Some("DEU"), Country),
        entity("wd:Q142", "France", Some("FRA"), Country),
        entity("wd:Q38", "Italy", Some("ITA"), Country),
        entity("wd:Q96", "Mexico", Some("MEX"), Country),
        entity("wd:Q17", "Japan", Some("JPN"), Country),
        entity("wd:Q884", "South Korea", Some("KOR"), Country),
        entity("wd:Q408", "Australia", Some("AUS"), Country),
        entity("wd:Q258", "South Africa", Some("ZAF"), Country),
        entity("wd:Q79", "Egypt", Some("EGY"), Country),
        entity("wd:Q414", "Argentina", Some("ARG"), Country),
        entity("wd:Q298", "Chile", Some("CHL"), Country),
        entity("wd:Q159", "Russia", Some("RUS"), Country),
        entity("wd:Q16", "Canada", Some("CAN"), Country),
        entity("wd:Q11708", "South-East Asia", None, Region),
        entity("wd:Q865", "South Asia", None, Region),
        entity("wd:Q7159", "World Health Organization", None, Organization),
    ]
}

pub fn country_coordinates() -> Vec<CountryCoordinates> {
    let table: [(&str, &str, f64, f64); 20] = [
        ("IDN", "Indonesia", -0.7893, 113.9213),
        ("IND", "India", 20.5937, 78.9629),
        ("BRA", "Brazil", -14.2350, -51.9253),
        ("USA", "United States", 37.0902, -95.7129),
        ("CHN", "China", 35.8617, 104.1954),
        ("NLD", "Netherlands", 52.1326, 5.2913),
        ("GBR", "United Kingdom", 55.3781, -3.4360),
        ("DEU", "Germany", 51.1657, 10.4515),
        ("FRA", "France", 46.2276, 2.2137),
        ("ITA", "Italy", 41.8719, 12.5674),
        ("MEX", "Mexico", 23.6345, -102.5528),
        ("JPN", "Japan", 36.2048, 138.2529),
        ("KOR", "South Korea", 35.9078, 127.7669),
        ("AUS", "Australia", -25.2744, 133.7751),
        ("ZAF", "South Africa", -30.5595, 22.9375),
        ("EGY", "Egypt", 26.8206, 30.8025),
        ("ARG", "Argentina", -38.4161, -63.6167),
        ("CHL", "Chile", -35.6751, -71.5430),
        ("RUS", "Russia", 61.5240, 105.3188),
        ("CAN", "Canada", 56.1304, -106.3468),
    ];
    table
        .iter()
        .map(|(iso3, label, lat, lon)| CountryCoordinates {
            iso3_code: iso3.to_string(),
            label: label.to_string(),
            latitude: *lat,
            longitude: *lon,
        })
        .collect()
}

fn attr(
    property: &str,
    label: &str,
    value: &str,
    value_type: AttributeValueType,
    unit: Option<&str>,
) -> EntityAttribute {
    EntityAttribute {
        property: property.to_string(),
        property_label: label.to_string(),
        value: value.to_string(),
        value_label: None,
        value_type,
        unit: unit.map(str::to_string),
    }
}

fn entity_attr(property: &str, label: &str, value: &str, value_label: &str) -> EntityAttribute {
    EntityAttribute {
        value_label: Some(value_label.to_string()),
        ..attr(property, label, value, AttributeValueType::Entity, None)
    }
}

fn related(
    id: &str,
    label: &str,
    entity_type: EntityType,
    rel: (&str, &str),
    description: Option<&str>,
) -> RelatedEntity {
    RelatedEntity {
        id: id.to_string(),
        label: label.to_string(),
        entity_type,
        relationship_type: rel.0.to_string(),
        relationship_label: rel.1.to_string(),
        description: description.map(str::to_string),
    }
}

fn source(name: &str, url: &str, date: Option<&str>) -> Source {
    Source {
        name: name.to_string(),
        url: Some(url.to_string()),
        date: date.map(str::to_string),
    }
}

/// Per-year series: (id, label, [(year, value)]).
type Series<'a> = (&'a str, &'a str, &'a [(i32, f64)]);

fn metrics(
    category: MetricCategory,
    unit: Option<&str>,
    series: &[Series<'_>],
) -> Vec<HealthMetric> {
    let mut out = Vec::new();
    for (id, label, points) in series {
        for (year, value) in points.iter() {
            out.push(HealthMetric {
                id: id.to_string(),
                label: label.to_string(),
                value: *value,
                year: *year,
                unit: unit.map(str::to_string),
                category,
            });
        }
    }
    out
}

fn indonesia() -> EntityInfo {
    use AttributeValueType::{Date, Number};
    EntityInfo {
        id: "wd:Q252".to_string(),
        label: "Indonesia".to_string(),
        entity_type: EntityType::Country,
        description: Some(
            "Country in Southeast Asia and Oceania between the Indian and Pacific oceans."
                .to_string(),
        ),
        image: Some(
            "https://upload.wikimedia.org/wikipedia/commons/thumb/9/9f/Flag_of_Indonesia.svg/320px-Flag_of_Indonesia.svg.png"
                .to_string(),
        ),
        attributes: vec![
            attr("P298", "ISO 3166-1 alpha-3 code", "IDN", AttributeValueType::String, None),
            attr("P1082", "Population", "273523615", Number, Some("inhabitants")),
            entity_attr("P36", "Capital", "wd:Q3630", "Jakarta"),
            attr("P571", "Inception", "1945-08-17", Date, None),
            attr("P2046", "Area", "1904569", Number, Some("km²")),
        ],
        health_metrics: Some(HealthMetrics {
            disease_cases: metrics(
                MetricCategory::Disease,
                None,
                &[
                    ("hivCases", "HIV/AIDS Cases", &[(2020, 45000.0), (2019, 43500.0), (2018, 42000.0)]),
                    ("malariaCases", "Malaria Cases", &[(2020, 120000.0), (2019, 135000.0), (2018, 148000.0)]),
                    ("tuberculosisCases", "Tuberculosis Cases", &[(2020, 845000.0), (2019, 825000.0), (2018, 810000.0)]),
                    ("rabiesCases", "Rabies Cases", &[(2020, 150.0), (2019, 180.0), (2018, 200.0)]),
                    ("choleraCases", "Cholera Cases", &[(2020, 320.0), (2019, 450.0), (2018, 580.0)]),
                ],
            ),
            vaccination_coverage: metrics(
                MetricCategory::Vaccination,
                Some("children"),
                &[
                    ("bcg", "BCG", &[(2020, 3250000.0), (2019, 3300000.0), (2018, 3280000.0)]),
                    ("dtp3", "DTP3", &[(2020, 3100000.0), (2019, 3200000.0), (2018, 3150000.0)]),
                    ("measles1", "Measles (1st dose)", &[(2020, 2950000.0), (2019, 3050000.0), (2018, 3000000.0)]),
                    ("polio3", "Polio (3rd dose)", &[(2020, 3100000.0), (2019, 3180000.0), (2018, 3120000.0)]),
                ],
            ),
            population: metrics(
                MetricCategory::Population,
                Some("children"),
                &[(
                    "populationAge0",
                    "Population Age 0",
                    &[(2020, 4650000.0), (2019, 4600000.0), (2018, 4550000.0)],
                )],
            ),
            available_years: vec![2020, 2019, 2018],
        }),
        related_entities: vec![
            related(
                "wd:Q11708",
                "South-East Asia",
                EntityType::Region,
                ("P361", "part of"),
                Some("Subregion of Asia consisting of countries south of China, east of India, and north of Australia"),
            ),
            related(
                "wd:Q7159",
                "World Health Organization",
                EntityType::Organization,
                ("P463", "member of"),
                Some("Specialized agency of the United Nations responsible for international public health"),
            ),
            related(
                "wd:Q3630",
                "Jakarta",
                EntityType::Country,
                ("P36", "capital"),
                Some("Capital and largest city of Indonesia"),
            ),
        ],
        sources: vec![
            source("Wikidata", "https://www.wikidata.org/wiki/Q252", Some("2024")),
            source("World Health Organization", "https://www.who.int", None),
        ],
    }
}

fn india() -> EntityInfo {
    use AttributeValueType::{Date, Number};
    EntityInfo {
        id: "wd:Q668".to_string(),
        label: "India".to_string(),
        entity_type: EntityType::Country,
        description: Some("Country in South Asia".to_string()),
        image: None,
        attributes: vec![
            attr("P298", "ISO 3166-1 alpha-3 code", "IND", AttributeValueType::String, None),
            attr("P1082", "Population", "1428627663", Number, Some("inhabitants")),
            entity_attr("P36", "Capital", "wd:Q987", "New Delhi"),
            attr("P571", "Inception", "1947-08-15", Date, None),
        ],
        health_metrics: Some(HealthMetrics {
            disease_cases: metrics(
                MetricCategory::Disease,
                None,
                &[
                    ("tuberculosisCases", "Tuberculosis Cases", &[(2020, 2590000.0), (2019, 2640000.0)]),
                    ("malariaCases", "Malaria Cases", &[(2020, 186532.0), (2019, 338494.0)]),
                ],
            ),
            vaccination_coverage: metrics(
                MetricCategory::Vaccination,
                Some("children"),
                &[("dtp3", "DTP3", &[(2020, 21500000.0), (2019, 22800000.0)])],
            ),
            population: Vec::new(),
            available_years: vec![2020, 2019],
        }),
        related_entities: vec![
            related("wd:Q865", "South Asia", EntityType::Region, ("P361", "part of"), None),
            related(
                "wd:Q7159",
                "World Health Organization",
                EntityType::Organization,
                ("P463", "member of"),
                None,
            ),
        ],
        sources: vec![source("Wikidata", "https://www.wikidata.org/wiki/Q668", None)],
    }
}

fn brazil() -> EntityInfo {
    use AttributeValueType::Number;
    EntityInfo {
        id: "wd:Q155".to_string(),
        label: "Brazil".to_string(),
        entity_type: EntityType::Country,
        description: Some("Country in South America".to_string()),
        image: None,
        attributes: vec![
            attr("P298", "ISO 3166-1 alpha-3 code", "BRA", AttributeValueType::String, None),
            attr("P1082", "Population", "215313498", Number, Some("inhabitants")),
            entity_attr("P36", "Capital", "wd:Q2844", "Brasília"),
        ],
        health_metrics: Some(HealthMetrics {
            disease_cases: metrics(
                MetricCategory::Disease,
                None,
                &[("malariaCases", "Malaria Cases", &[(2020, 145188.0), (2019, 157454.0)])],
            ),
            vaccination_coverage: Vec::new(),
            population: Vec::new(),
            available_years: vec![2020, 2019],
        }),
        related_entities: vec![related(
            "wd:Q7159",
            "World Health Organization",
            EntityType::Organization,
            ("P463", "member of"),
            None,
        )],
        sources: vec![source("Wikidata", "https://www.wikidata.org/wiki/Q155", None)],
    }
}

fn south_east_asia() -> EntityInfo {
    use AttributeValueType::Number;
    EntityInfo {
        id: "wd:Q11708".to_string(),
        label: "South-East Asia".to_string(),
        entity_type: EntityType::Region,
        description: Some(
            "Subregion of Asia consisting of countries south of China, east of India, and north of Australia"
                .to_string(),
        ),
        image: None,
        attributes: vec![
            attr("P31", "Instance of", "Subregion", AttributeValueType::String, None),
            attr("P1082", "Population", "685000000", Number, Some("inhabitants")),
        ],
        health_metrics: None,
        related_entities: vec![
            related("wd:Q252", "Indonesia", EntityType::Country, ("P527", "has part"), None),
            related("wd:Q869", "Thailand", EntityType::Country, ("P527", "has part"), None),
        ],
        sources: vec![source("Wikidata", "https://www.wikidata.org/wiki/Q11708", None)],
    }
}

/// Info panel entries keyed by label.
pub fn entity_infos() -> Vec<EntityInfo> {
    vec![indonesia(), india(), brazil(), south_east_asia()]
}

pub fn sample_queries() -> Vec<SampleQuery> {
    vec![
        SampleQuery::Titled {
            id: Some("1".to_string()),
            title: Some("List all countries".to_string()),
            query: r#"PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX wdt: <http://www.wikidata.org/prop/direct/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT ?country ?label WHERE {
  ?country wdt:P31 wd:Q6256 .
  ?country rdfs:label ?label .
  FILTER(LANG(?label) = "en")
}
LIMIT 10"#
                .to_string(),
        },
        SampleQuery::Titled {
            id: Some("2".to_string()),
            title: Some("Countries with population".to_string()),
            query: r#"PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX wdt: <http://www.wikidata.org/prop/direct/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT ?country ?label ?population WHERE {
  ?country wdt:P31 wd:Q6256 .
  ?country rdfs:label ?label .
  ?country wdt:P1082 ?population .
  FILTER(LANG(?label) = "en")
}
ORDER BY DESC(?population)
LIMIT 10"#
                .to_string(),
        },
    ]
}

/// Used when the samples endpoint is unreachable.
pub fn fallback_sample_queries() -> Vec<String> {
    vec![
        r#"# Get all countries
SELECT ?country ?label WHERE {
  ?country rdf:type <http://example.org/Country> .
  ?country rdfs:label ?label .
} LIMIT 10"#
            .to_string(),
        r#"# Get health data for a specific country
SELECT ?year ?hivCases ?malariaCases WHERE {
  ?record <http://example.org/location> <http://example.org/IND> .
  ?record <http://example.org/year> ?year .
  OPTIONAL { ?record <http://example.org/hivCases> ?hivCases . }
  OPTIONAL { ?record <http://example.org/malariaCases> ?malariaCases . }
} ORDER BY ?year"#
            .to_string(),
        r#"# Count total health records
SELECT (COUNT(?record) as ?count) WHERE {
  ?record rdf:type <http://example.org/HealthRecord> .
}"#
        .to_string(),
    ]
}

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

pub fn query_results() -> SparqlQueryResponse {
    let rows = [
        ("Q252", "Indonesia", "273523615"),
        ("Q668", "India", "1428627663"),
        ("Q155", "Brazil", "215313498"),
        ("Q30", "United States", "331893745"),
        ("Q148", "China", "1412600000"),
    ];
    let bindings = rows
        .iter()
        .map(|(qid, label, population)| {
            let mut binding = Binding::new();
            binding.insert(
                "country".to_string(),
                SparqlValue::uri(format!("http://www.wikidata.org/entity/{}", qid)),
            );
            binding.insert("label".to_string(), SparqlValue::literal(*label));
            binding.insert(
                "population".to_string(),
                SparqlValue::typed(*population, XSD_INTEGER),
            );
            binding
        })
        .collect();

    SparqlQueryResponse {
        head: SparqlHead {
            vars: vec![
                "country".to_string(),
                "label".to_string(),
                "population".to_string(),
            ],
        },
        results: SparqlResults { bindings },
    }
}
