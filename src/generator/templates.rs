use crate::error::Result;
use tera::Tera;

pub const AEROSPIKE_CONF: &str = "aerospike.conf";
pub const HELPER_SCRIPT: &str = "helper.sh";

const AEROSPIKE_CONF_TEMPLATE: &str = r#"# Generated by aero-compose for namespace {{ namespace }}.
service {
    cluster-name {{ cluster_name }}
}

logging {
    console {
        context any info
    }
}

network {
    service {
        address any
        port {{ service_port }}
    }

    fabric {
        address any
        port {{ fabric_port }}
    }

    heartbeat {
        mode mesh
        address any
        port {{ heartbeat_port }}
        interval 150
        timeout 10
    }
}

namespace {{ namespace }} {
    replication-factor {{ replication_factor }}

    storage-engine device {
        file {{ file }}
        filesize {{ filesize }}
        read-page-cache {{ read_page_cache }}
    }
}
"#;

const HELPER_SCRIPT_TEMPLATE: &str = r#"#!/usr/bin/env sh
# Generated by aero-compose: {{ description }}
# Set AERO_COMPOSE to point at a binary that is not on PATH.
set -e
DIR="$(cd "$(dirname "$0")" && pwd)"
exec "${AERO_COMPOSE:-aero-compose}" --output "$DIR" {{ command }} "$@"
"#;

/// Builds the template registry used by every generator
pub fn build_tera() -> Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (AEROSPIKE_CONF, AEROSPIKE_CONF_TEMPLATE),
        (HELPER_SCRIPT, HELPER_SCRIPT_TEMPLATE),
    ])
    .map_err(crate::error::GeneratorError::from)?;
    Ok(tera)
}
