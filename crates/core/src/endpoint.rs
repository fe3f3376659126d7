//! S3 static website endpoints
//!
//! Each region serves bucket websites from a fixed hostname, and Route 53
//! alias records must name the hosted zone that owns that hostname.

use crate::error::{Error, Result};

/// Website endpoint of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub region: &'static str,
    pub host: &'static str,
    pub zone_id: &'static str,
}

const fn endpoint(region: &'static str, host: &'static str, zone_id: &'static str) -> Endpoint {
    Endpoint {
        region,
        host,
        zone_id,
    }
}

// Older regions use a dash before the region name, newer ones a dot.
static ENDPOINTS: &[Endpoint] = &[
    endpoint("us-east-1", "s3-website-us-east-1.amazonaws.com", "Z3AQBSTGFYJSTF"),
    endpoint("us-east-2", "s3-website.us-east-2.amazonaws.com", "Z2O1EMRO9K5GLX"),
    endpoint("us-west-1", "s3-website-us-west-1.amazonaws.com", "Z2F56UZL2M1ACD"),
    endpoint("us-west-2", "s3-website-us-west-2.amazonaws.com", "Z3BJ6K6RIION7M"),
    endpoint("ca-central-1", "s3-website.ca-central-1.amazonaws.com", "Z1QDHH18159H29"),
    endpoint("ap-south-1", "s3-website.ap-south-1.amazonaws.com", "Z11RGJOFQNVJUP"),
    endpoint("ap-northeast-1", "s3-website-ap-northeast-1.amazonaws.com", "Z2M4EHUR26P7ZW"),
    endpoint("ap-northeast-2", "s3-website.ap-northeast-2.amazonaws.com", "Z3W03O7B5YMIYP"),
    endpoint("ap-northeast-3", "s3-website.ap-northeast-3.amazonaws.com", "Z2YQB5RD63NC85"),
    endpoint("ap-southeast-1", "s3-website-ap-southeast-1.amazonaws.com", "Z3O0J2DXBE1FTB"),
    endpoint("ap-southeast-2", "s3-website-ap-southeast-2.amazonaws.com", "Z1WCIGYICN2BYD"),
    endpoint("eu-central-1", "s3-website.eu-central-1.amazonaws.com", "Z21DNDUVLTQW6Q"),
    endpoint("eu-west-1", "s3-website-eu-west-1.amazonaws.com", "Z1BKCTXD74EZPE"),
    endpoint("eu-west-2", "s3-website.eu-west-2.amazonaws.com", "Z3GKZC51ZF0DB4"),
    endpoint("eu-west-3", "s3-website.eu-west-3.amazonaws.com", "Z3R1K369G5AVDG"),
    endpoint("eu-north-1", "s3-website.eu-north-1.amazonaws.com", "Z3BAZG2TWCNX0D"),
    endpoint("sa-east-1", "s3-website-sa-east-1.amazonaws.com", "Z7KQH4QJS55SO"),
];

/// Look up the website endpoint for a region
pub fn get_endpoint(region: &str) -> Result<&'static Endpoint> {
    ENDPOINTS
        .iter()
        .find(|e| e.region == region)
        .ok_or_else(|| Error::UnknownRegion(region.to_string()))
}

/// Check whether a region has a known website endpoint
pub fn known_region(region: &str) -> bool {
    get_endpoint(region).is_ok()
}
