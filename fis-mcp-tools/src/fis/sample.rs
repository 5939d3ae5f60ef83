//! Example experiment template served to agents as a starting point

use serde_json::{json, Value};

/// URI under which the example template is published
pub const EXAMPLE_TEMPLATE_URI: &str = "fis://templates/example";

/// Stops every running `env=prod` instance in one AZ of a VPC, restarting
/// them after two minutes, with a CloudWatch alarm as the stop condition.
pub fn example_template() -> Value {
    json!({
        "tags": {"Name": "StopEC2InstancesWithFilters"},
        "description": "Stop and restart all instances in us-east-1b with the tag env=prod in the specified VPC",
        "targets": {
            "myInstances": {
                "resourceType": "aws:ec2:instance",
                "resourceTags": {"env": "prod"},
                "filters": [
                    {"path": "Placement.AvailabilityZone", "values": ["us-east-1b"]},
                    {"path": "State.Name", "values": ["running"]},
                    {"path": "VpcId", "values": ["vpc-aabbcc11223344556"]}
                ],
                "selectionMode": "ALL"
            }
        },
        "actions": {
            "StopInstances": {
                "actionId": "aws:ec2:stop-instances",
                "description": "stop the instances",
                "parameters": {"startInstancesAfterDuration": "PT2M"},
                "targets": {"Instances": "myInstances"}
            }
        },
        "stopConditions": [
            {
                "source": "aws:cloudwatch:alarm",
                "value": "arn:aws:cloudwatch:us-east-1:111122223333:alarm:alarm-name"
            }
        ],
        "roleArn": "arn:aws:iam::111122223333:role/role-name"
    })
}
